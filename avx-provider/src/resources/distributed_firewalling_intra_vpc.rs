//! distributed_firewalling_intra_vpc - VPCs that enforce DCF on traffic inside the VPC

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::{self, IntraVpcList};
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "distributed-firewalling intra VPC list";

pub struct IntraVpc;

fn vpc_list(config: Fields<'_>) -> ProviderResult<IntraVpcList> {
    let vpcs = config
        .blocks("vpcs")?
        .into_iter()
        .map(|vpc| -> ProviderResult<models::IntraVpc> {
            Ok(models::IntraVpc {
                account_name: vpc.string("account_name")?,
                vpc_id: vpc.string("vpc_id")?,
                region: vpc.string("region")?,
            })
        })
        .collect::<ProviderResult<Vec<_>>>()?;
    Ok(IntraVpcList { vpcs })
}

#[async_trait]
impl ResourceHandler for IntraVpc {
    fn type_name(&self) -> &'static str {
        "distributed_firewalling_intra_vpc"
    }

    fn schema(&self) -> ResourceSchema {
        let vpc = types::block(vec![
            AttributeSchema::new("account_name", AttributeType::String).required(),
            AttributeSchema::new("vpc_id", AttributeType::String).required(),
            AttributeSchema::new("region", AttributeType::String).required(),
        ]);
        ResourceSchema::new(self.type_name())
            .with_description("VPCs with intra-VPC distributed firewalling")
            .attribute(AttributeSchema::new("vpcs", AttributeType::List(Box::new(vpc))).required())
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let list = vpc_list(config)?;
        ctx.client
            .update_distributed_firewalling_intra_vpc(&list)
            .await
            .or_fail("create", WHAT)?;
        Ok(ctx.controller_id())
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        ctx.check_controller_id(id)?;
        let Some(list) = ctx
            .client
            .get_distributed_firewalling_intra_vpc()
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        let vpcs = list
            .vpcs
            .into_iter()
            .map(|vpc| {
                Value::Map(HashMap::from([
                    ("account_name".to_string(), Value::from(vpc.account_name)),
                    ("vpc_id".to_string(), Value::from(vpc.vpc_id)),
                    ("region".to_string(), Value::from(vpc.region)),
                ]))
            })
            .collect();
        Ok(Some(HashMap::from([("vpcs".to_string(), Value::List(vpcs))])))
    }

    async fn update(
        &self,
        ctx: &Context<'_>,
        _id: &str,
        changes: &Changes<'_>,
    ) -> ProviderResult<()> {
        if changes.has_change("vpcs") {
            let list = vpc_list(changes.new_fields())?;
            ctx.client
                .update_distributed_firewalling_intra_vpc(&list)
                .await
                .or_fail("update", WHAT)?;
        }
        Ok(())
    }

    async fn delete(&self, ctx: &Context<'_>, _id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        ctx.client
            .delete_distributed_firewalling_intra_vpc()
            .await
            .or_fail("delete", WHAT)
    }
}
