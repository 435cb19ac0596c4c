//! copilot_simple_deployment - Single-instance CoPilot launched by the controller
//!
//! Deployment is asynchronous: create starts it and then polls the
//! association status until the controller reports CoPilot as associated.
//! Every attribute forces replacement.

use std::collections::HashMap;

use async_trait::async_trait;
use avx_client::models::{self, CopilotAssociationStatus};
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Value};
use avx_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use crate::handler::{ClientResultExt, Context, ResourceHandler};
use crate::poll::wait_for;

const WHAT: &str = "CoPilot";

pub struct CopilotSimpleDeployment;

fn deployment(config: Fields<'_>) -> ProviderResult<models::CopilotSimpleDeployment> {
    Ok(models::CopilotSimpleDeployment {
        cloud_type: config.int("cloud_type")?,
        account_name: config.string("account_name")?,
        region: config.string("region")?,
        vpc_id: config.string("vpc_id")?,
        subnet: config.string("subnet")?,
        controller_service_account_username: config
            .string("controller_service_account_username")?,
        controller_service_account_password: config
            .string("controller_service_account_password")?,
        instance_size: config.string("instance_size")?,
        data_volume_size: config.int("data_volume_size")?,
    })
}

/// Association status, `None` while CoPilot is not reachable yet
async fn association(ctx: &Context<'_>) -> ProviderResult<Option<CopilotAssociationStatus>> {
    ctx.client
        .get_copilot_association_status()
        .await
        .found()
        .or_fail("get association status of", WHAT)
}

#[async_trait]
impl ResourceHandler for CopilotSimpleDeployment {
    fn type_name(&self) -> &'static str {
        "copilot_simple_deployment"
    }

    fn schema(&self) -> ResourceSchema {
        let input = |name: &str, attr_type: AttributeType| {
            AttributeSchema::new(name, attr_type).required().force_new()
        };
        ResourceSchema::new(self.type_name())
            .with_description("CoPilot deployed and associated by the controller")
            .attribute(input("cloud_type", types::positive_int()))
            .attribute(input("account_name", AttributeType::String))
            .attribute(input("region", AttributeType::String))
            .attribute(input("vpc_id", AttributeType::String))
            .attribute(input("subnet", types::cidr()).with_description("Subnet CIDR"))
            .attribute(input("controller_service_account_username", AttributeType::String))
            .attribute(
                input("controller_service_account_password", AttributeType::String).sensitive(),
            )
            .attribute(
                AttributeSchema::new("instance_size", AttributeType::String)
                    .with_default("t3.2xlarge")
                    .force_new(),
            )
            .attribute(
                AttributeSchema::new("data_volume_size", types::positive_int())
                    .with_default(Value::Int(100))
                    .force_new()
                    .with_description("Data volume size in GiB"),
            )
            .attribute(AttributeSchema::new("public_ip", AttributeType::String).computed())
            .attribute(AttributeSchema::new("private_ip", AttributeType::String).computed())
    }

    async fn create(&self, ctx: &Context<'_>, config: Fields<'_>) -> ProviderResult<String> {
        let deployment = deployment(config)?;
        log::info!(
            "deploying CoPilot in {} ({}) with {}",
            deployment.vpc_id,
            deployment.region,
            deployment.instance_size
        );
        ctx.client
            .create_copilot_simple(&deployment)
            .await
            .or_fail("start deploying", WHAT)?;

        let associated = wait_for(ctx.poll, || async {
            Ok::<_, ProviderError>(association(ctx).await?.filter(|status| status.status))
        })
        .await?;
        if associated.is_none() {
            return Err(ProviderError::remote(format!(
                "could not deploy copilot: not associated after {} retries",
                ctx.poll.max_retries
            )));
        }
        Ok(ctx.controller_id())
    }

    async fn read(
        &self,
        ctx: &Context<'_>,
        id: &str,
        _prior: Fields<'_>,
    ) -> ProviderResult<Option<Attributes>> {
        ctx.check_controller_id(id)?;
        Ok(association(ctx).await?.map(|status| {
            HashMap::from([
                ("private_ip".to_string(), Value::from(status.private_ip)),
                ("public_ip".to_string(), Value::from(status.public_ip)),
            ])
        }))
    }

    async fn delete(&self, ctx: &Context<'_>, _id: &str, _state: Fields<'_>) -> ProviderResult<()> {
        ctx.client
            .delete_copilot_simple()
            .await
            .or_fail("delete", WHAT)
    }
}

#[cfg(test)]
mod tests {
    use avx_core::provider::{ErrorKind, Provider};
    use avx_core::resource::{Resource, ResourceId};

    use super::*;
    use crate::testing::{CONTROLLER_ID, FAST_POLL, provider};

    fn resource() -> Resource {
        Resource::new("copilot_simple_deployment", "copilot")
            .with_attribute("cloud_type", 1i64)
            .with_attribute("account_name", "aws-prod")
            .with_attribute("region", "us-east-1")
            .with_attribute("vpc_id", "vpc-1")
            .with_attribute("subnet", "10.0.0.0/24")
            .with_attribute("controller_service_account_username", "copilot")
            .with_attribute("controller_service_account_password", "secret")
    }

    #[tokio::test]
    async fn create_polls_until_associated() {
        let (fake, provider) = provider();
        fake.state().copilot_pending_polls = 3;

        let state = provider.create(&resource()).await.unwrap();

        assert_eq!(state.identifier.as_deref(), Some(CONTROLLER_ID));
        assert_eq!(state.attributes["private_ip"], Value::from("10.0.0.10"));
        assert_eq!(state.attributes["public_ip"], Value::from("54.1.2.3"));
        assert_eq!(state.attributes["instance_size"], Value::from("t3.2xlarge"));
        assert_eq!(state.attributes["data_volume_size"], Value::Int(100));

        let polls = fake
            .calls()
            .iter()
            .filter(|c| c.as_str() == "get_copilot_association_status()")
            .count();
        // Four probes during create plus the read-back
        assert_eq!(polls, 5);
    }

    #[tokio::test]
    async fn create_gives_up_after_max_retries() {
        let (fake, provider) = provider();
        fake.state().copilot_pending_polls = 100;

        let err = provider.create(&resource()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Remote);
        assert!(err.message.starts_with("could not deploy copilot"));
        // The deploy call, then the first probe and one per retry
        assert_eq!(fake.calls().len(), 2 + FAST_POLL.max_retries as usize);
    }

    #[tokio::test]
    async fn status_errors_stop_polling() {
        let (fake, provider) = provider();
        fake.fail("get_copilot_association_status", "controller busy");

        let err = provider.create(&resource()).await.unwrap_err();
        assert_eq!(
            err.message,
            "failed to get association status of CoPilot: \
             rest API get_copilot_association_status failed: controller busy"
        );
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test]
    async fn every_change_requires_replacement() {
        let (_, provider) = provider();
        let config = resource();
        let state = provider.create(&config).await.unwrap();

        let bigger = config.clone().with_attribute("instance_size", "t3.4xlarge");
        let err = provider
            .update(&bigger.id, CONTROLLER_ID, &state, &bigger)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn password_is_sensitive() {
        let schema = CopilotSimpleDeployment.schema();
        assert!(schema.attributes["controller_service_account_password"].sensitive);
    }

    #[tokio::test]
    async fn import_rejects_foreign_controller_id() {
        let (fake, provider) = provider();
        provider.create(&resource()).await.unwrap();
        fake.clear_calls();

        let id = ResourceId::new("copilot_simple_deployment", "copilot");
        let err = provider.import(&id, "10-9-9-9").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(fake.calls().is_empty());

        let state = provider.import(&id, CONTROLLER_ID).await.unwrap();
        assert_eq!(state.attributes["private_ip"], Value::from("10.0.0.10"));
    }
}
