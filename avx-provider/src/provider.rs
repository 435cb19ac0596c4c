//! Aviatrix provider implementation
//!
//! This module sequences every lifecycle call the same way regardless of
//! resource type: validate, call the handler, read back, and translate the
//! handler's answer into a [`State`].

use std::sync::Arc;

use avx_client::ControllerApi;
use avx_core::differ::Changes;
use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult};
use avx_core::resource::{Attributes, Resource, ResourceId, State};

use crate::config::{ConfigError, ProviderConfig};
use crate::data_sources;
use crate::handler::{Context, DataSourceHandler, ResourceHandler};
use crate::poll::PollSettings;
use crate::resources;

/// Provider backed by one Aviatrix controller
pub struct AviatrixProvider {
    client: Arc<dyn ControllerApi>,
    controller_ip: String,
    poll: PollSettings,
    resources: Vec<Box<dyn ResourceHandler>>,
    data_sources: Vec<Box<dyn DataSourceHandler>>,
}

impl AviatrixProvider {
    pub fn new(client: Arc<dyn ControllerApi>, controller_ip: impl Into<String>) -> Self {
        Self {
            client,
            controller_ip: controller_ip.into(),
            poll: PollSettings::default(),
            resources: resources::handlers(),
            data_sources: data_sources::handlers(),
        }
    }

    /// Build a provider after checking the connection settings
    pub fn from_config(
        client: Arc<dyn ControllerApi>,
        config: &ProviderConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(client, config.controller_ip.clone()))
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn controller_ip(&self) -> &str {
        &self.controller_ip
    }

    fn context(&self) -> Context<'_> {
        Context {
            client: self.client.as_ref(),
            controller_ip: &self.controller_ip,
            poll: &self.poll,
        }
    }

    fn resource_handler(&self, id: &ResourceId) -> ProviderResult<&dyn ResourceHandler> {
        self.resources
            .iter()
            .find(|h| h.type_name() == id.resource_type)
            .map(|h| h.as_ref())
            .ok_or_else(|| unknown_type(id))
    }

    fn data_source_handler(&self, id: &ResourceId) -> Option<&dyn DataSourceHandler> {
        self.data_sources
            .iter()
            .find(|h| h.type_name() == id.resource_type)
            .map(|h| h.as_ref())
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Read a resource, or look up a data source using `prior` as its configuration
    pub async fn read_resource(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
        prior: Option<&Attributes>,
    ) -> ProviderResult<State> {
        let empty = Attributes::new();
        let prior = prior.unwrap_or(&empty);

        if let Some(handler) = self.data_source_handler(id) {
            return self.read_data_source(handler, id, prior).await;
        }

        let handler = self.resource_handler(id)?;
        let Some(identifier) = identifier else {
            return Ok(State::not_found(id.clone()));
        };

        match handler
            .read(&self.context(), identifier, Fields::new(prior))
            .await
            .map_err(|e| e.for_resource(id.clone()))?
        {
            Some(attributes) => {
                Ok(State::existing(id.clone(), merge(prior, attributes)).with_identifier(identifier))
            }
            None => {
                log::info!("{} ({}) no longer exists, removing from state", id, identifier);
                Ok(State::not_found(id.clone()))
            }
        }
    }

    async fn read_data_source(
        &self,
        handler: &dyn DataSourceHandler,
        id: &ResourceId,
        config: &Attributes,
    ) -> ProviderResult<State> {
        let (identifier, attributes) = handler
            .read(&self.context(), Fields::new(config))
            .await
            .map_err(|e| e.for_resource(id.clone()))?;
        Ok(State::existing(id.clone(), merge(config, attributes)).with_identifier(identifier))
    }

    /// Adopt an existing object; malformed identifiers are rejected before any remote call
    pub async fn import_resource(&self, id: &ResourceId, identifier: &str) -> ProviderResult<State> {
        let handler = self.resource_handler(id)?;
        handler
            .parse_identifier(identifier)
            .map_err(|e| e.for_resource(id.clone()))?;
        self.read_resource(id, Some(identifier), None).await
    }

    pub async fn create_resource(&self, resource: &Resource) -> ProviderResult<State> {
        let id = &resource.id;
        let handler = self.resource_handler(id)?;
        let config = resources::prepare(handler, resource)?;

        log::debug!("creating {}", id);
        let identifier = handler
            .create(&self.context(), Fields::new(&config))
            .await
            .map_err(|e| e.for_resource(id.clone()))?;
        log::info!("created {} ({})", id, identifier);

        self.read_back(handler, id, &identifier, config, "create")
            .await
    }

    pub async fn update_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        from: &State,
        to: &Resource,
    ) -> ProviderResult<State> {
        let handler = self.resource_handler(id)?;
        let config = resources::prepare(handler, to)?;
        let schema = handler.schema();
        let changes = Changes::new(&schema, &from.attributes, &config);

        if changes.is_empty() {
            log::debug!("{} has no changes", id);
            return Ok(State::existing(id.clone(), merge(&from.attributes, config))
                .with_identifier(identifier));
        }

        let replace = changes.replacement_attributes();
        if !replace.is_empty() {
            return Err(ProviderError::validation(format!(
                "changing {} requires replacing the resource",
                replace.join(", ")
            ))
            .for_resource(id.clone()));
        }

        log::debug!(
            "updating {} ({}): {}",
            id,
            identifier,
            changes.changed_attributes().join(", ")
        );
        handler
            .update(&self.context(), identifier, &changes)
            .await
            .map_err(|e| e.for_resource(id.clone()))?;

        let config = merge(&from.attributes, config);
        self.read_back(handler, id, identifier, config, "update")
            .await
    }

    pub async fn delete_resource(
        &self,
        id: &ResourceId,
        identifier: &str,
        state: &State,
    ) -> ProviderResult<()> {
        let handler = self.resource_handler(id)?;
        log::debug!("deleting {} ({})", id, identifier);
        handler
            .delete(&self.context(), identifier, Fields::new(&state.attributes))
            .await
            .map_err(|e| e.for_resource(id.clone()))?;
        log::info!("deleted {} ({})", id, identifier);
        Ok(())
    }

    /// Resync computed attributes right after a write
    async fn read_back(
        &self,
        handler: &dyn ResourceHandler,
        id: &ResourceId,
        identifier: &str,
        config: Attributes,
        op: &str,
    ) -> ProviderResult<State> {
        let attributes = handler
            .read(&self.context(), identifier, Fields::new(&config))
            .await
            .map_err(|e| e.for_resource(id.clone()))?
            .ok_or_else(|| {
                ProviderError::remote(format!(
                    "{} not found after {} ({})",
                    handler.type_name(),
                    op,
                    identifier
                ))
                .for_resource(id.clone())
            })?;
        Ok(State::existing(id.clone(), merge(&config, attributes)).with_identifier(identifier))
    }
}

/// Attributes read from the controller win over the ones already known
fn merge(base: &Attributes, read: Attributes) -> Attributes {
    let mut merged = base.clone();
    merged.extend(read);
    merged
}

fn unknown_type(id: &ResourceId) -> ProviderError {
    ProviderError::unsupported(format!("Unknown resource type: {}", id.resource_type))
        .for_resource(id.clone())
}
