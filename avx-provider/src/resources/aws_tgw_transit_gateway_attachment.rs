//! aws_tgw_transit_gateway_attachment - Transit gateway VPC attached to an AWS TGW
//!
//! Identified by `tgw_name~vpc_id`. Every attribute forces replacement.

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models;
use avx_core::fields::Fields;
use avx_core::identifier::{self, DELIMITER};
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "AWS TGW transit gateway attachment";

pub struct AwsTgwTransitGatewayAttachment;

fn attachment(config: Fields<'_>) -> ProviderResult<models::AwsTgwTransitGatewayAttachment> {
    Ok(models::AwsTgwTransitGatewayAttachment {
        tgw_name: config.string("tgw_name")?,
        region: config.string("region")?,
        vpc_account_name: config.string("vpc_account_name")?,
        vpc_id: config.string("vpc_id")?,
        transit_gateway_name: config.string("transit_gateway_name")?,
    })
}

#[async_trait]
impl ResourceHandler for AwsTgwTransitGatewayAttachment {
    fn type_name(&self) -> &'static str {
        "aws_tgw_transit_gateway_attachment"
    }

    fn schema(&self) -> ResourceSchema {
        let input = |name: &str, attr_type: AttributeType| {
            AttributeSchema::new(name, attr_type).required().force_new()
        };
        ResourceSchema::new(self.type_name())
            .with_description("Aviatrix transit gateway VPC attached to an AWS TGW")
            .attribute(input("tgw_name", types::natural_key()).with_description("Name of the AWS TGW"))
            .attribute(input("region", AttributeType::String))
            .attribute(
                input("vpc_account_name", AttributeType::String)
                    .with_description("Access account that owns the VPC"),
            )
            .attribute(input("vpc_id", types::natural_key()))
            .attribute(
                input("transit_gateway_name", AttributeType::String)
                    .with_description("Transit gateway in the VPC"),
            )
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        let [tgw_name, vpc_id] = identifier::split::<2>(id, DELIMITER)?;
        Ok(HashMap::from([
            ("tgw_name".to_string(), Value::from(tgw_name)),
            ("vpc_id".to_string(), Value::from(vpc_id)),
        ]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let attachment = attachment(config)?;
        log::info!(
            "attaching {} ({}) to TGW {}",
            attachment.vpc_id,
            attachment.transit_gateway_name,
            attachment.tgw_name
        );
        ctx.client
            .create_aws_tgw_transit_gateway_attachment(&attachment)
            .await
            .or_fail("create", WHAT)?;
        Ok(identifier::join(
            [attachment.tgw_name.as_str(), attachment.vpc_id.as_str()],
            DELIMITER,
        )?)
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        let [tgw_name, vpc_id] = identifier::split::<2>(id, DELIMITER)?;
        let Some(attachment) = ctx
            .client
            .get_aws_tgw_transit_gateway_attachment(&tgw_name, &vpc_id)
            .await
            .found()
            .or_fail("read", WHAT)?
        else {
            return Ok(None);
        };

        Ok(Some(HashMap::from([
            ("tgw_name".to_string(), Value::from(attachment.tgw_name)),
            ("region".to_string(), Value::from(attachment.region)),
            ("vpc_account_name".to_string(), Value::from(attachment.vpc_account_name)),
            ("vpc_id".to_string(), Value::from(attachment.vpc_id)),
            (
                "transit_gateway_name".to_string(),
                Value::from(attachment.transit_gateway_name),
            ),
        ])))
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        let [tgw_name, vpc_id] = identifier::split::<2>(id, DELIMITER)?;
        ctx.client
            .delete_aws_tgw_transit_gateway_attachment(&tgw_name, &vpc_id)
            .await
            .or_fail("delete", WHAT)
    }
}
