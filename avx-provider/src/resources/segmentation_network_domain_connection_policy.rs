//! segmentation_network_domain_connection_policy - Allow traffic between two network domains

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models;
use avx_core::fields::Fields;
use avx_core::identifier::{self, DELIMITER};
use avx_core::provider::ProviderResult;
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};

const WHAT: &str = "segmentation network domain connection policy";

pub struct SegmentationConnectionPolicy;

fn policy(config: Fields<'_>) -> ProviderResult<models::SegmentationConnectionPolicy> {
    Ok(models::SegmentationConnectionPolicy {
        domain_name: config.string("domain_name_1")?,
        other_domain_name: config.string("domain_name_2")?,
    })
}

#[async_trait]
impl ResourceHandler for SegmentationConnectionPolicy {
    fn type_name(&self) -> &'static str {
        "segmentation_network_domain_connection_policy"
    }

    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(self.type_name())
            .with_description("Connection policy between two network domains")
            .attribute(
                AttributeSchema::new("domain_name_1", types::natural_key())
                    .required()
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("domain_name_2", types::natural_key())
                    .required()
                    .force_new(),
            )
    }

    fn parse_identifier(&self, id: &str) -> ProviderResult<Attributes> {
        let [first, second] = identifier::split::<2>(id, DELIMITER)?;
        Ok(HashMap::from([
            ("domain_name_1".to_string(), Value::from(first)),
            ("domain_name_2".to_string(), Value::from(second)),
        ]))
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let policy = policy(config)?;
        ctx.client
            .create_segmentation_connection_policy(&policy)
            .await
            .or_fail("create", WHAT)?;
        Ok(identifier::join(
            [policy.domain_name.as_str(), policy.other_domain_name.as_str()],
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
        let policy = policy(Fields::new(&keys))?;
        let found = ctx
            .client
            .get_segmentation_connection_policy(&policy)
            .await
            .found()
            .or_fail("find", WHAT)?;
        Ok(found.map(|()| keys))
    }

    async fn delete(&self, ctx: &Context<'_>, id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        let keys = self.parse_identifier(id)?;
        let policy = policy(Fields::new(&keys))?;
        ctx.client
            .delete_segmentation_connection_policy(&policy)
            .await
            .or_fail("delete", WHAT)
    }
}

#[cfg(test)]
mod tests {
    use avx_core::provider::Provider;
    use avx_core::resource::Resource;

    use super::*;
    use crate::testing::provider;

    #[tokio::test]
    async fn create_and_import() {
        let (fake, provider) = provider();
        let resource = Resource::new("segmentation_network_domain_connection_policy", "dev_qa")
            .with_attribute("domain_name_1", "dev")
            .with_attribute("domain_name_2", "qa");

        let state = provider.create(&resource).await.unwrap();
        assert_eq!(state.identifier.as_deref(), Some("dev~qa"));
        assert!(
            fake.state()
                .segmentation_policies
                .contains(&("dev".to_string(), "qa".to_string()))
        );

        let imported = provider.import(&resource.id, "dev~qa").await.unwrap();
        assert_eq!(imported.attributes, state.attributes);
    }
}
