//! network_domains - Every network domain known to the controller

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::NetworkDomainSummary;
use avx_core::fields::Fields;
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, DataSourceHandler};

pub struct NetworkDomains;

fn domain_attributes(domain: NetworkDomainSummary) -> Value {
    Value::Map(HashMap::from([
        ("name".to_string(), Value::from(domain.name)),
        ("tgw_name".to_string(), Value::from(domain.tgw_name)),
        ("route_table_id".to_string(), Value::from(domain.route_table_id)),
        ("account".to_string(), Value::from(domain.account)),
        ("cloud_type".to_string(), Value::Int(domain.cloud_type)),
        ("region".to_string(), Value::from(domain.region)),
        (
            "intra_domain_inspection".to_string(),
            Value::Bool(domain.intra_domain_inspection),
        ),
        ("egress_inspection".to_string(), Value::Bool(domain.egress_inspection)),
        ("inspection_policy".to_string(), Value::from(domain.inspection_policy)),
        (
            "intra_domain_inspection_name".to_string(),
            Value::from(domain.intra_domain_inspection_name),
        ),
        (
            "egress_inspection_name".to_string(),
            Value::from(domain.egress_inspection_name),
        ),
        ("type".to_string(), Value::from(domain.domain_type)),
    ]))
}

#[async_trait]
impl DataSourceHandler for NetworkDomains {
    fn type_name(&self) -> &'static str {
        "network_domains"
    }

    fn schema(&self) -> ResourceSchema {
        let computed = |name: &str, attr_type: AttributeType| {
            AttributeSchema::new(name, attr_type).computed()
        };
        let domain = types::block(vec![
            computed("name", AttributeType::String),
            computed("tgw_name", AttributeType::String),
            computed("route_table_id", AttributeType::String),
            computed("account", AttributeType::String),
            computed("cloud_type", AttributeType::Int),
            computed("region", AttributeType::String),
            computed("intra_domain_inspection", AttributeType::Bool),
            computed("egress_inspection", AttributeType::Bool),
            computed("inspection_policy", AttributeType::String),
            computed("intra_domain_inspection_name", AttributeType::String),
            computed("egress_inspection_name", AttributeType::String),
            computed("type", AttributeType::String),
        ]);
        ResourceSchema::new(self.type_name())
            .with_description("All network domains on the controller")
            .attribute(computed("network_domains", AttributeType::List(Box::new(domain))))
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        _config: Fields<'_>,
    ) -> ProviderResult<(String, Attributes)> {
        let domains = ctx
            .client
            .list_network_domains()
            .await
            .or_fail("list", "network domains")?;
        log::debug!("controller reported {} network domains", domains.len());

        let domains = domains.into_iter().map(domain_attributes).collect();
        Ok((
            ctx.controller_id(),
            HashMap::from([("network_domains".to_string(), Value::List(domains))]),
        ))
    }
}
