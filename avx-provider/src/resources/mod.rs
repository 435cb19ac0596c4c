//! Resource type definitions
//!
//! This module defines:
//! - The registry of managed resource handlers
//! - `ResourceType` entries for resources and data sources
//! - Offline validation shared by the provider and the CLI

pub mod aws_guard_duty;
pub mod aws_tgw_network_domain;
pub mod aws_tgw_peering;
pub mod aws_tgw_peering_domain_conn;
pub mod aws_tgw_transit_gateway_attachment;
pub mod controller_bgp_max_as_limit_config;
pub mod copilot_simple_deployment;
pub mod distributed_firewalling_default_action_rule;
pub mod distributed_firewalling_intra_vpc;
pub mod distributed_firewalling_policy_list;
pub mod edge_spoke;
pub mod rbac_group_access_account_membership;
pub mod segmentation_network_domain_association;
pub mod segmentation_network_domain_connection_policy;
pub mod smart_group;
pub mod vpn_user;

use avx_core::fields::Fields;
use avx_core::provider::{ProviderError, ProviderResult, ResourceType};
use avx_core::resource::{Attributes, Resource};
use avx_core::schema::ResourceSchema;

use crate::data_sources;
use crate::handler::ResourceHandler;

// =============================================================================
// Registry
// =============================================================================

/// Returns a handler for every managed resource type
pub fn handlers() -> Vec<Box<dyn ResourceHandler>> {
    vec![
        Box::new(aws_tgw_peering::AwsTgwPeering),
        Box::new(aws_tgw_network_domain::AwsTgwNetworkDomain),
        Box::new(aws_tgw_peering_domain_conn::AwsTgwPeeringDomainConn),
        Box::new(aws_tgw_transit_gateway_attachment::AwsTgwTransitGatewayAttachment),
        Box::new(segmentation_network_domain_connection_policy::SegmentationConnectionPolicy),
        Box::new(segmentation_network_domain_association::SegmentationDomainAssociation),
        Box::new(aws_guard_duty::AwsGuardDuty),
        Box::new(vpn_user::VpnUser),
        Box::new(rbac_group_access_account_membership::RbacGroupAccessAccountMembership),
        Box::new(distributed_firewalling_policy_list::PolicyList),
        Box::new(distributed_firewalling_default_action_rule::DefaultActionRule),
        Box::new(distributed_firewalling_intra_vpc::IntraVpc),
        Box::new(controller_bgp_max_as_limit_config::BgpMaxAsLimitConfig),
        Box::new(copilot_simple_deployment::CopilotSimpleDeployment),
        Box::new(edge_spoke::EdgeSpoke),
        Box::new(smart_group::SmartGroup),
    ]
}

/// Look up the handler for a managed resource type
pub fn find(resource_type: &str) -> Option<Box<dyn ResourceHandler>> {
    handlers()
        .into_iter()
        .find(|h| h.type_name() == resource_type)
}

/// Resource type entry backed by a handler's schema
struct RegisteredType {
    name: &'static str,
    schema: ResourceSchema,
    data_source: bool,
}

impl ResourceType for RegisteredType {
    fn name(&self) -> &'static str {
        self.name
    }

    fn schema(&self) -> ResourceSchema {
        self.schema.clone()
    }

    fn is_data_source(&self) -> bool {
        self.data_source
    }
}

/// Returns all resource and data source types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    let resources = handlers().into_iter().map(|h| RegisteredType {
        name: h.type_name(),
        schema: h.schema(),
        data_source: false,
    });
    let lookups = data_sources::handlers().into_iter().map(|h| RegisteredType {
        name: h.type_name(),
        schema: h.schema(),
        data_source: true,
    });
    resources
        .chain(lookups)
        .map(|t| Box::new(t) as Box<dyn ResourceType>)
        .collect()
}

// =============================================================================
// Validation
// =============================================================================

/// Check a configuration without contacting the controller
pub fn validate(resource: &Resource) -> ProviderResult<()> {
    if resource.is_data_source() {
        let handler = data_sources::find(&resource.id.resource_type).ok_or_else(|| {
            ProviderError::unsupported(format!(
                "Unknown data source type: {}",
                resource.id.resource_type
            ))
            .for_resource(resource.id.clone())
        })?;
        return check_schema(&handler.schema(), resource).map(|_| ());
    }

    let handler = find(&resource.id.resource_type).ok_or_else(|| {
        ProviderError::unsupported(format!(
            "Unknown resource type: {}",
            resource.id.resource_type
        ))
        .for_resource(resource.id.clone())
    })?;
    prepare(handler.as_ref(), resource).map(|_| ())
}

/// Validate a configuration and return it with declared defaults filled in
pub(crate) fn prepare(
    handler: &dyn ResourceHandler,
    resource: &Resource,
) -> ProviderResult<Attributes> {
    let config = check_schema(&handler.schema(), resource)?;
    handler
        .validate(Fields::new(&config))
        .map_err(|e| e.for_resource(resource.id.clone()))?;
    Ok(config)
}

fn check_schema(schema: &ResourceSchema, resource: &Resource) -> ProviderResult<Attributes> {
    schema.validate(&resource.attributes).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ProviderError::validation(messages.join("; ")).for_resource(resource.id.clone())
    })?;

    let mut config = resource.attributes.clone();
    schema.apply_defaults(&mut config);
    Ok(config)
}
