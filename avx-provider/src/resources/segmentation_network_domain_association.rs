//! segmentation_network_domain_association - Attach a network domain to a transit attachment

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models;
use avx_core::fields::Fields;
use avx_core::identifier::{self, DELIMITER};
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "segmentation network domain association";

pub struct SegmentationDomainAssociation;

fn association(config: Fields<'_>) -> ProviderResult<models::SegmentationDomainAssociation> {
    Ok(models::SegmentationDomainAssociation {
        transit_gateway_name: config.string("transit_gateway_name")?,
        network_domain_name: config.string("network_domain_name")?,
        attachment_name: config.string("attachment_name")?,
    })
}

#[async_trait]
impl ResourceHandler for SegmentationDomainAssociation {
    fn type_name(&self) -> &'static str {
        "segmentation_network_domain_association"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("Association between a network domain and a transit attachment")
            .attribute(
                AttributeSchema::new("transit_gateway_name", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("network_domain_name", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("attachment_name", types::natural_key())
                    .required()
                    .force_new()
                    .with_description("Spoke or edge attachment name"),
            )
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        let [transit, domain, attachment] = identifier::split::<3>(id, DELIMITER)?;
        Ok(HashMap::from([
            ("transit_gateway_name".to_string(), Value::from(transit)),
            ("network_domain_name".to_string(), Value::from(domain)),
            ("attachment_name".to_string(), Value::from(attachment)),
        ]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let association = association(config)?;
        ctx.client
            .create_segmentation_domain_association(&association)
            .await
            .or_fail("create", WHAT)?;
        Ok(identifier::join(
            [
                association.transit_gateway_name.as_str(),
                association.network_domain_name.as_str(),
                association.attachment_name.as_str(),
            ],
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
        let association = association(Fields::new(&keys))?;
        let found = ctx
            .client
            .get_segmentation_domain_association(&association)
            .await
            .found()
            .or_fail("find", WHAT)?;
        Ok(found.map(|()| keys))
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        let keys = self.parse_identifier(id)?;
        let association = association(Fields::new(&keys))?;
        ctx.client
            .delete_segmentation_domain_association(&association)
            .await
            .or_fail("delete", WHAT)
    }
}
