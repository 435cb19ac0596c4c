//! smart_groups - Every smart group on the controller

use std::collections::HashMap;

use async_trait::async_trait;
use avx_core::fields::Fields;
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, DataSourceHandler};
use crate::resources::smart_group::selector_value;

pub struct SmartGroups;

#[async_trait]
impl DataSourceHandler for SmartGroups {
    fn type_name(&self) -> &'static str {
        "smart_groups"
    }

    fn schema(&self) -> ResourceSchema {
        let computed = |name: &str, attr_type: AttributeType| {
            AttributeSchema::new(name, attr_type).computed()
        };
        let criteria = [
            "cidr",
            "fqdn",
            "site",
            "type",
            "res_id",
            "account_id",
            "account_name",
            "name",
            "region",
            "zone",
        ];
        let mut expression: Vec<AttributeSchema> = criteria
            .iter()
            .map(|name| computed(name, AttributeType::String))
            .collect();
        expression.push(computed("tags", AttributeType::Map(Box::new(AttributeType::String))));
        let selector = types::block(vec![computed(
            "match_expressions",
            AttributeType::List(Box::new(types::block(expression))),
        )]);
        let group = types::block(vec![
            computed("uuid", AttributeType::String),
            computed("name", AttributeType::String),
            computed("selector", AttributeType::List(Box::new(selector))),
        ]);
        ResourceSchema::new(self.type_name())
            .with_description("All smart groups on the controller")
            .attribute(computed("smart_groups", AttributeType::List(Box::new(group))))
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        _config: Fields<'_>,
    ) -> ProviderResult<(String, Attributes)> {
        let groups = ctx
            .client
            .list_smart_groups()
            .await
            .or_fail("list", "smart groups")?;

        let groups = groups
            .into_iter()
            .map(|group| {
                Value::Map(HashMap::from([
                    ("uuid".to_string(), Value::from(group.uuid)),
                    ("name".to_string(), Value::from(group.name)),
                    ("selector".to_string(), selector_value(group.selector)),
                ]))
            })
            .collect();
        Ok((
            ctx.controller_id(),
            HashMap::from([("smart_groups".to_string(), Value::List(groups))]),
        ))
    }
}
