//! Aviatrix Provider
//!
//! Lifecycle adapter between resource configurations and an Aviatrix
//! controller.
//!
//! ## Module Structure
//!
//! - `provider` - AviatrixProvider implementation
//! - `handler` - Traits implemented by each resource and data source
//! - `resources` - One module per managed resource type
//! - `data_sources` - Read-only lookups
//! - `config` - Connection settings
//! - `poll` - Fixed-interval polling for asynchronous operations

pub mod config;
pub mod data_sources;
pub mod handler;
pub mod poll;
pub mod provider;
pub mod resources;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use config::{ConfigError, ProviderConfig};
pub use poll::PollSettings;
pub use provider::AviatrixProvider;

use avx_core::provider::{BoxFuture, Provider, ProviderResult, ResourceType};
use avx_core::resource::{Attributes, Resource, ResourceId, State};

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for AviatrixProvider {
    fn name(&self) -> &'static str {
        "aviatrix"
    }

    fn resource_types(&self) -> Vec<Box<dyn ResourceType>> {
        resources::resource_types()
    }

    fn validate(&self, resource: &Resource) -> ProviderResult<()> {
        resources::validate(resource)
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
        prior: Option<&Attributes>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        let prior = prior.cloned();
        Box::pin(async move {
            self.read_resource(&id, identifier.as_deref(), prior.as_ref())
                .await
        })
    }

    fn import(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move { self.import_resource(&id, &identifier).await })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(&resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let from = from.clone();
        let to = to.clone();
        Box::pin(async move { self.update_resource(&id, &identifier, &from, &to).await })
    }

    fn delete(
        &self,
        id: &ResourceId,
        identifier: &str,
        state: &State,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let state = state.clone();
        Box::pin(async move { self.delete_resource(&id, &identifier, &state).await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use avx_core::provider::ErrorKind;
    use avx_core::resource::Value;

    use super::*;
    use crate::testing::{FakeController, provider};

    fn peering(name: &str) -> Resource {
        Resource::new("aws_tgw_peering", name)
            .with_attribute("tgw_name1", "tgw1")
            .with_attribute("tgw_name2", "tgw2")
    }

    #[test]
    fn lists_every_type() {
        let (_, provider) = provider();
        let names: Vec<&str> = provider.resource_types().iter().map(|t| t.name()).collect();
        assert!(names.contains(&"aws_tgw_peering"));
        assert!(names.contains(&"edge_spoke"));
        assert!(names.contains(&"network_domains"));
        assert_eq!(provider.name(), "aviatrix");
    }

    #[test]
    fn from_config_requires_credentials() {
        let fake = Arc::new(FakeController::new());
        let config = ProviderConfig {
            controller_ip: "10.1.2.3".to_string(),
            ..Default::default()
        };
        assert!(AviatrixProvider::from_config(fake, &config).is_err());
    }

    #[tokio::test]
    async fn create_returns_final_state() {
        let (fake, provider) = provider();
        let state = provider.create(&peering("east_west")).await.unwrap();

        assert!(state.exists);
        assert_eq!(state.identifier.as_deref(), Some("tgw1~tgw2"));
        assert_eq!(
            fake.calls(),
            vec![
                "create_aws_tgw_peering(tgw1, tgw2)",
                "get_aws_tgw_peering(tgw1, tgw2)",
            ]
        );
    }

    #[tokio::test]
    async fn create_wraps_remote_errors() {
        let (fake, provider) = provider();
        fake.fail("create_aws_tgw_peering", "tgw1 is not attached");

        let err = provider.create(&peering("east_west")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Remote);
        assert_eq!(
            err.to_string(),
            "[aws_tgw_peering.east_west] failed to create AWS TGW peering: \
             rest API create_aws_tgw_peering failed: tgw1 is not attached"
        );
    }

    #[tokio::test]
    async fn invalid_configuration_makes_no_calls() {
        let (fake, provider) = provider();
        let resource = Resource::new("aws_tgw_peering", "bad").with_attribute("tgw_name1", "tgw1");

        let err = provider.create(&resource).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.to_string().contains("tgw_name2"));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn read_of_missing_object_clears_identifier() {
        let (_, provider) = provider();
        let id = ResourceId::new("aws_tgw_peering", "gone");

        let state = provider.read(&id, Some("tgw1~tgw2"), None).await.unwrap();
        assert!(!state.exists);
        assert_eq!(state.identifier, None);
    }

    #[tokio::test]
    async fn read_without_identifier_is_not_found() {
        let (fake, provider) = provider();
        let id = ResourceId::new("aws_tgw_peering", "new");

        let state = provider.read(&id, None, None).await.unwrap();
        assert!(!state.exists);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn other_read_errors_surface() {
        let (fake, provider) = provider();
        fake.fail("get_aws_tgw_peering", "session expired");
        let id = ResourceId::new("aws_tgw_peering", "east_west");

        let err = provider.read(&id, Some("tgw1~tgw2"), None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Remote);
    }

    #[tokio::test]
    async fn import_populates_natural_keys() {
        let (_, provider) = provider();
        provider.create(&peering("east_west")).await.unwrap();

        let id = ResourceId::new("aws_tgw_peering", "imported");
        let state = provider.import(&id, "tgw1~tgw2").await.unwrap();
        assert!(state.exists);
        assert_eq!(state.identifier.as_deref(), Some("tgw1~tgw2"));
        assert_eq!(state.attributes.get("tgw_name1"), Some(&Value::from("tgw1")));
        assert_eq!(state.attributes.get("tgw_name2"), Some(&Value::from("tgw2")));
    }

    #[tokio::test]
    async fn import_rejects_malformed_identifier_without_calls() {
        let (fake, provider) = provider();
        let id = ResourceId::new("aws_tgw_peering", "imported");

        let err = provider.import(&id, "tgw1~tgw2~tgw3").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn update_without_changes_makes_no_calls() {
        let (fake, provider) = provider();
        let resource = peering("east_west");
        let state = provider.create(&resource).await.unwrap();
        fake.clear_calls();

        let updated = provider
            .update(&resource.id, "tgw1~tgw2", &state, &resource)
            .await
            .unwrap();
        assert!(fake.calls().is_empty());
        assert_eq!(updated.attributes, state.attributes);
        assert_eq!(updated.identifier.as_deref(), Some("tgw1~tgw2"));
    }

    #[tokio::test]
    async fn update_of_force_new_attribute_requires_replacement() {
        let (fake, provider) = provider();
        let resource = peering("east_west");
        let state = provider.create(&resource).await.unwrap();
        fake.clear_calls();

        let changed = resource.clone().with_attribute("tgw_name2", "tgw3");
        let err = provider
            .update(&resource.id, "tgw1~tgw2", &state, &changed)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.to_string().contains("tgw_name2"));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_type_is_unsupported() {
        let (_, provider) = provider();
        let err = provider
            .create(&Resource::new("aviatrix_unicorn", "x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn delete_then_read_reports_not_found() {
        let (_, provider) = provider();
        let resource = peering("east_west");
        let state = provider.create(&resource).await.unwrap();

        provider
            .delete(&resource.id, "tgw1~tgw2", &state)
            .await
            .unwrap();
        let state = provider
            .read(&resource.id, Some("tgw1~tgw2"), Some(&state.attributes))
            .await
            .unwrap();
        assert!(!state.exists);
    }
}
