//! Controller operations used by the provider
//!
//! One method per remote operation. Lookups return [`Error::NotFound`] when
//! the object is absent so callers can tell "gone" apart from "failed".
//!
//! [`Error::NotFound`]: crate::error::Error::NotFound

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    ActiveStandbyMode, AwsGuardDutyAccount, AwsTgwPeering, AwsTgwTransitGatewayAttachment,
    BgpMaxAsLimit, CopilotAssociationStatus, CopilotSimpleDeployment, DefaultActionRule,
    DistributedFirewallingPolicyList, EdgeSpoke, IntraVpcList, NetworkDomain,
    NetworkDomainSummary, RbacGroupAccessAccounts, SegmentationConnectionPolicy,
    SegmentationDomainAssociation, SmartGroup, TgwDomainConnection, VpnUser,
};

/// Interface to an Aviatrix controller
#[async_trait]
pub trait ControllerApi: Send + Sync {
    // =========================================================================
    // AWS Transit Gateway
    // =========================================================================

    async fn create_aws_tgw_peering(&self, peering: &AwsTgwPeering) -> Result<()>;

    /// `Ok(())` when the peering exists
    async fn get_aws_tgw_peering(&self, peering: &AwsTgwPeering) -> Result<()>;

    async fn delete_aws_tgw_peering(&self, peering: &AwsTgwPeering) -> Result<()>;

    async fn create_aws_tgw_transit_gateway_attachment(
        &self,
        attachment: &AwsTgwTransitGatewayAttachment,
    ) -> Result<()>;

    /// NotFound when the VPC is not attached or carries no transit gateway
    async fn get_aws_tgw_transit_gateway_attachment(
        &self,
        tgw_name: &str,
        vpc_id: &str,
    ) -> Result<AwsTgwTransitGatewayAttachment>;

    async fn delete_aws_tgw_transit_gateway_attachment(
        &self,
        tgw_name: &str,
        vpc_id: &str,
    ) -> Result<()>;

    async fn create_network_domain(&self, domain: &NetworkDomain) -> Result<()>;

    async fn get_network_domain(&self, tgw_name: &str, name: &str) -> Result<NetworkDomain>;

    async fn delete_network_domain(&self, domain: &NetworkDomain) -> Result<()>;

    async fn list_network_domains(&self) -> Result<Vec<NetworkDomainSummary>>;

    async fn create_domain_connection(&self, connection: &TgwDomainConnection) -> Result<()>;

    /// Domains connected to `domain_name` on `tgw_name`, as `tgw:domain` strings
    async fn list_connected_domains(&self, tgw_name: &str, domain_name: &str)
    -> Result<Vec<String>>;

    async fn delete_domain_connection(&self, connection: &TgwDomainConnection) -> Result<()>;

    // =========================================================================
    // Segmentation
    // =========================================================================

    async fn create_segmentation_connection_policy(
        &self,
        policy: &SegmentationConnectionPolicy,
    ) -> Result<()>;

    async fn get_segmentation_connection_policy(
        &self,
        policy: &SegmentationConnectionPolicy,
    ) -> Result<()>;

    async fn delete_segmentation_connection_policy(
        &self,
        policy: &SegmentationConnectionPolicy,
    ) -> Result<()>;

    async fn create_segmentation_domain_association(
        &self,
        association: &SegmentationDomainAssociation,
    ) -> Result<()>;

    async fn get_segmentation_domain_association(
        &self,
        association: &SegmentationDomainAssociation,
    ) -> Result<()>;

    async fn delete_segmentation_domain_association(
        &self,
        association: &SegmentationDomainAssociation,
    ) -> Result<()>;

    // =========================================================================
    // AWS GuardDuty
    // =========================================================================

    async fn enable_aws_guard_duty(&self, account: &AwsGuardDutyAccount) -> Result<()>;

    async fn update_aws_guard_duty_excluded_ips(&self, account: &AwsGuardDutyAccount)
    -> Result<()>;

    async fn get_aws_guard_duty_account(
        &self,
        account_name: &str,
        region: &str,
    ) -> Result<AwsGuardDutyAccount>;

    async fn disable_aws_guard_duty(&self, account: &AwsGuardDutyAccount) -> Result<()>;

    // =========================================================================
    // VPN users
    // =========================================================================

    async fn create_vpn_user(&self, user: &VpnUser) -> Result<()>;

    async fn get_vpn_user(&self, user_name: &str) -> Result<VpnUser>;

    async fn delete_vpn_user(&self, user: &VpnUser) -> Result<()>;

    async fn attach_vpn_user_to_profile(&self, user_name: &str, profile: &str) -> Result<()>;

    async fn detach_vpn_user_from_profile(&self, user_name: &str, profile: &str) -> Result<()>;

    // =========================================================================
    // RBAC
    // =========================================================================

    async fn add_access_accounts_to_rbac_group(
        &self,
        membership: &RbacGroupAccessAccounts,
    ) -> Result<()>;

    async fn list_access_accounts_in_rbac_group(&self, group_name: &str) -> Result<Vec<String>>;

    async fn delete_access_accounts_from_rbac_group(
        &self,
        membership: &RbacGroupAccessAccounts,
    ) -> Result<()>;

    // =========================================================================
    // Distributed firewalling
    // =========================================================================

    async fn update_distributed_firewalling_policy_list(
        &self,
        policies: &DistributedFirewallingPolicyList,
    ) -> Result<()>;

    async fn get_distributed_firewalling_policy_list(
        &self,
    ) -> Result<DistributedFirewallingPolicyList>;

    async fn delete_distributed_firewalling_policy_list(&self) -> Result<()>;

    async fn update_distributed_firewalling_default_action_rule(
        &self,
        rule: &DefaultActionRule,
    ) -> Result<()>;

    async fn get_distributed_firewalling_default_action_rule(&self) -> Result<DefaultActionRule>;

    async fn update_distributed_firewalling_intra_vpc(&self, vpcs: &IntraVpcList) -> Result<()>;

    async fn get_distributed_firewalling_intra_vpc(&self) -> Result<IntraVpcList>;

    async fn delete_distributed_firewalling_intra_vpc(&self) -> Result<()>;

    // =========================================================================
    // Controller settings
    // =========================================================================

    async fn set_controller_bgp_max_as_limit(&self, limit: i64) -> Result<()>;

    async fn disable_controller_bgp_max_as_limit(&self) -> Result<()>;

    async fn set_controller_bgp_max_as_limit_non_rfc1918(&self, limit: i64) -> Result<()>;

    async fn disable_controller_bgp_max_as_limit_non_rfc1918(&self) -> Result<()>;

    async fn get_controller_bgp_max_as_limit(&self) -> Result<BgpMaxAsLimit>;

    // =========================================================================
    // CoPilot
    // =========================================================================

    /// Starts an asynchronous deployment; poll the association status for completion
    async fn create_copilot_simple(&self, deployment: &CopilotSimpleDeployment) -> Result<()>;

    async fn get_copilot_association_status(&self) -> Result<CopilotAssociationStatus>;

    async fn delete_copilot_simple(&self) -> Result<()>;

    // =========================================================================
    // Edge spoke gateways
    // =========================================================================

    async fn create_edge_spoke(&self, gateway: &EdgeSpoke) -> Result<()>;

    async fn get_edge_spoke(&self, gw_name: &str) -> Result<EdgeSpoke>;

    async fn delete_edge_spoke(&self, gw_name: &str) -> Result<()>;

    async fn set_edge_spoke_local_as_number(&self, gw_name: &str, asn: &str) -> Result<()>;

    /// An empty path clears the prepended AS path
    async fn set_edge_spoke_prepend_as_path(&self, gw_name: &str, path: &[String]) -> Result<()>;

    async fn set_edge_spoke_learned_cidrs_approval(&self, gw_name: &str, enabled: bool)
    -> Result<()>;

    async fn update_edge_spoke_approved_learned_cidrs(
        &self,
        gw_name: &str,
        cidrs: &[String],
    ) -> Result<()>;

    /// `None` disables active-standby
    async fn update_edge_spoke_active_standby(
        &self,
        gw_name: &str,
        mode: Option<ActiveStandbyMode>,
    ) -> Result<()>;

    /// Sends the WAN, LAN, management egress and WAN public IP settings of `gateway`
    async fn update_edge_spoke_ip_configurations(&self, gateway: &EdgeSpoke) -> Result<()>;

    /// An empty list stops manual advertisement
    async fn set_edge_spoke_bgp_manual_advertise_cidrs(
        &self,
        gw_name: &str,
        cidrs: &[String],
    ) -> Result<()>;

    async fn set_edge_spoke_preserve_as_path(&self, gw_name: &str, enabled: bool) -> Result<()>;

    async fn set_edge_spoke_bgp_polling_time(&self, gw_name: &str, seconds: i64) -> Result<()>;

    async fn set_edge_spoke_bgp_hold_time(&self, gw_name: &str, seconds: i64) -> Result<()>;

    async fn set_edge_spoke_transitive_routing(&self, gw_name: &str, enabled: bool) -> Result<()>;

    async fn set_edge_spoke_jumbo_frame(&self, gw_name: &str, enabled: bool) -> Result<()>;

    async fn update_edge_spoke_geo_coordinate(
        &self,
        gw_name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<()>;

    // =========================================================================
    // Smart groups
    // =========================================================================

    /// Returns the UUID assigned by the controller
    async fn create_smart_group(&self, group: &SmartGroup) -> Result<String>;

    async fn get_smart_group(&self, uuid: &str) -> Result<SmartGroup>;

    async fn update_smart_group(&self, uuid: &str, group: &SmartGroup) -> Result<()>;

    async fn delete_smart_group(&self, uuid: &str) -> Result<()>;

    async fn list_smart_groups(&self) -> Result<Vec<SmartGroup>>;
}
