//! aws_tgw_peering - Peering between two AWS Transit Gateways

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models;
use avx_core::fields::Fields;
use avx_core::identifier::{self, DELIMITER};
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "AWS TGW peering";

pub struct AwsTgwPeering;

fn peering(config: Fields<'_>) -> ProviderResult<models::AwsTgwPeering> {
    Ok(models::AwsTgwPeering {
        tgw_name1: config.string("tgw_name1")?,
        tgw_name2: config.string("tgw_name2")?,
    })
}

#[async_trait]
impl ResourceHandler for AwsTgwPeering {
    fn type_name(&self) -> &'static str {
        "aws_tgw_peering"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("Peering between two AWS TGWs")
            .attribute(
                AttributeSchema::new("tgw_name1", types::natural_key())
                    .required()
                    .force_new()
                    .with_description("Name of the first AWS TGW"),
            )
            .attribute(
                AttributeSchema::new("tgw_name2", types::natural_key())
                    .required()
                    .force_new()
                    .with_description("Name of the second AWS TGW"),
            )
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        let [tgw_name1, tgw_name2] = identifier::split::<2>(id, DELIMITER)?;
        Ok(HashMap::from([
            ("tgw_name1".to_string(), Value::from(tgw_name1)),
            ("tgw_name2".to_string(), Value::from(tgw_name2)),
        ]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let peering = peering(config)?;
        ctx.client
            .create_aws_tgw_peering(&peering)
            .await
            .or_fail("create", WHAT)?;
        Ok(identifier::join(
            [peering.tgw_name1.as_str(), peering.tgw_name2.as_str()],
            DELIMITER,
        )?)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let keys = self.parse_identifier(id)?;
        let peering = peering(Fields::new(&keys))?;
        match ctx
            .client
            .get_aws_tgw_peering(&peering)
            .await
            .found()
            .or_fail("find", WHAT)?
        {
            Some(()) => Ok(Some(keys)),
            None => Ok(None),
        }
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        let keys = self.parse_identifier(id)?;
        let peering = peering(Fields::new(&keys))?;
        ctx.client
            .delete_aws_tgw_peering(&peering)
            .await
            .or_fail("delete", WHAT)
    }
}
