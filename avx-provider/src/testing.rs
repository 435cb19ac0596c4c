//! In-memory controller used by the handler tests
//!
//! Every call is recorded as `method(args)` so tests can assert exactly
//! which remote operations a lifecycle step issued.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use avx_client::models::{
    ActiveStandbyMode, AwsGuardDutyAccount, AwsTgwPeering, AwsTgwTransitGatewayAttachment,
    BgpMaxAsLimit, CopilotAssociationStatus, CopilotSimpleDeployment, DefaultActionRule,
    DistributedFirewallingPolicyList, EdgeSpoke, IntraVpcList, NetworkDomain,
    NetworkDomainSummary, RbacGroupAccessAccounts, SegmentationConnectionPolicy,
    SegmentationDomainAssociation, SmartGroup, TgwDomainConnection, VpnUser,
};
use avx_client::{ControllerApi, Error, Result};
use avx_core::resource::{Attributes, Value};

use crate::handler::Context;
use crate::poll::PollSettings;
use crate::provider::AviatrixProvider;

pub const CONTROLLER_IP: &str = "10.1.2.3";

/// Identifier of singleton configuration on the fake controller
pub const CONTROLLER_ID: &str = "10-1-2-3";

/// WAN public IP the fake controller discovers for a new edge gateway
pub const EDGE_DISCOVERED_WAN_IP: &str = "203.0.113.10";

pub static FAST_POLL: PollSettings = PollSettings {
    interval: Duration::from_millis(1),
    max_retries: 5,
};

/// Provider wired to a fresh fake controller
pub fn provider() -> (Arc<FakeController>, AviatrixProvider) {
    let fake = Arc::new(FakeController::new());
    let provider = AviatrixProvider::new(fake.clone(), CONTROLLER_IP).with_poll_settings(FAST_POLL);
    (fake, provider)
}

pub fn attrs(pairs: &[(&str, Value)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub calls: Vec<String>,
    /// Method name to failure reason
    pub failures: HashMap<String, String>,

    pub tgw_peerings: BTreeSet<(String, String)>,
    pub tgw_attachments: BTreeMap<(String, String), AwsTgwTransitGatewayAttachment>,
    pub network_domains: BTreeMap<(String, String), NetworkDomain>,
    pub domain_connections: BTreeSet<(String, String, String, String)>,
    pub segmentation_policies: BTreeSet<(String, String)>,
    pub segmentation_associations: BTreeSet<(String, String, String)>,
    pub guard_duty: BTreeMap<(String, String), AwsGuardDutyAccount>,
    pub vpn_users: BTreeMap<String, VpnUser>,
    pub rbac_groups: BTreeMap<String, BTreeSet<String>>,
    pub dcf_policies: Option<DistributedFirewallingPolicyList>,
    pub default_action_rule: DefaultActionRule,
    pub intra_vpcs: IntraVpcList,
    pub bgp_max_as_limit: BgpMaxAsLimit,
    pub copilot: Option<CopilotSimpleDeployment>,
    /// Status probes answered with NotFound before the deployment reports ready
    pub copilot_pending_polls: u32,
    pub edge_spokes: BTreeMap<String, EdgeSpoke>,
    pub smart_groups: BTreeMap<String, SmartGroup>,
    next_uuid: u32,
}

#[derive(Debug, Default)]
pub struct FakeController {
    state: Mutex<FakeState>,
}

impl FakeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> Context<'_> {
        Context {
            client: self,
            controller_ip: CONTROLLER_IP,
            poll: &FAST_POLL,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Make every later call to `method` fail with `reason`
    pub fn fail(&self, method: &str, reason: &str) {
        self.state()
            .failures
            .insert(method.to_string(), reason.to_string());
    }

    /// Record a call and lock the store, or return the injected failure
    fn call(&self, method: &str, args: &[&str]) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(format!("{}({})", method, args.join(", ")));
        if let Some(reason) = state.failures.get(method) {
            return Err(Error::api(method, reason.clone()));
        }
        Ok(state)
    }
}

fn found<T: Clone>(value: Option<&T>) -> Result<T> {
    value.cloned().ok_or(Error::NotFound)
}

#[async_trait]
impl ControllerApi for FakeController {
    // =========================================================================
    // AWS Transit Gateway
    // =========================================================================

    async fn create_aws_tgw_peering(&self, peering: &AwsTgwPeering) -> Result<()> {
        let mut state = self.call(
            "create_aws_tgw_peering",
            &[&peering.tgw_name1, &peering.tgw_name2],
        )?;
        state
            .tgw_peerings
            .insert((peering.tgw_name1.clone(), peering.tgw_name2.clone()));
        Ok(())
    }

    async fn get_aws_tgw_peering(&self, peering: &AwsTgwPeering) -> Result<()> {
        let state = self.call(
            "get_aws_tgw_peering",
            &[&peering.tgw_name1, &peering.tgw_name2],
        )?;
        let key = (peering.tgw_name1.clone(), peering.tgw_name2.clone());
        if state.tgw_peerings.contains(&key) {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }

    async fn delete_aws_tgw_peering(&self, peering: &AwsTgwPeering) -> Result<()> {
        let mut state = self.call(
            "delete_aws_tgw_peering",
            &[&peering.tgw_name1, &peering.tgw_name2],
        )?;
        state
            .tgw_peerings
            .remove(&(peering.tgw_name1.clone(), peering.tgw_name2.clone()));
        Ok(())
    }

    async fn create_aws_tgw_transit_gateway_attachment(
        &self,
        attachment: &AwsTgwTransitGatewayAttachment,
    ) -> Result<()> {
        let mut state = self.call(
            "create_aws_tgw_transit_gateway_attachment",
            &[
                &attachment.tgw_name,
                &attachment.vpc_id,
                &attachment.transit_gateway_name,
            ],
        )?;
        state.tgw_attachments.insert(
            (attachment.tgw_name.clone(), attachment.vpc_id.clone()),
            attachment.clone(),
        );
        Ok(())
    }

    async fn get_aws_tgw_transit_gateway_attachment(
        &self,
        tgw_name: &str,
        vpc_id: &str,
    ) -> Result<AwsTgwTransitGatewayAttachment> {
        let state = self.call("get_aws_tgw_transit_gateway_attachment", &[tgw_name, vpc_id])?;
        found(
            state
                .tgw_attachments
                .get(&(tgw_name.to_string(), vpc_id.to_string())),
        )
    }

    async fn delete_aws_tgw_transit_gateway_attachment(
        &self,
        tgw_name: &str,
        vpc_id: &str,
    ) -> Result<()> {
        let mut state = self.call(
            "delete_aws_tgw_transit_gateway_attachment",
            &[tgw_name, vpc_id],
        )?;
        state
            .tgw_attachments
            .remove(&(tgw_name.to_string(), vpc_id.to_string()));
        Ok(())
    }

    async fn create_network_domain(&self, domain: &NetworkDomain) -> Result<()> {
        let mut state = self.call("create_network_domain", &[&domain.tgw_name, &domain.name])?;
        state.network_domains.insert(
            (domain.tgw_name.clone(), domain.name.clone()),
            NetworkDomain {
                force_delete: false,
                ..domain.clone()
            },
        );
        Ok(())
    }

    async fn get_network_domain(&self, tgw_name: &str, name: &str) -> Result<NetworkDomain> {
        let state = self.call("get_network_domain", &[tgw_name, name])?;
        found(
            state
                .network_domains
                .get(&(tgw_name.to_string(), name.to_string())),
        )
    }

    async fn delete_network_domain(&self, domain: &NetworkDomain) -> Result<()> {
        let mut state = self.call("delete_network_domain", &[&domain.tgw_name, &domain.name])?;
        if domain.is_default_domain() && !domain.force_delete {
            return Err(Error::api(
                "delete_route_domain",
                "default domains can only be deleted with force",
            ));
        }
        state
            .network_domains
            .remove(&(domain.tgw_name.clone(), domain.name.clone()));
        Ok(())
    }

    async fn list_network_domains(&self) -> Result<Vec<NetworkDomainSummary>> {
        let state = self.call("list_network_domains", &[])?;
        Ok(state
            .network_domains
            .values()
            .map(|domain| NetworkDomainSummary {
                name: domain.name.clone(),
                tgw_name: domain.tgw_name.clone(),
                route_table_id: format!("tgw-rtb-{}", domain.name.to_lowercase()),
                account: "aws-account".to_string(),
                cloud_type: 1,
                region: "us-east-1".to_string(),
                domain_type: "domain".to_string(),
                ..Default::default()
            })
            .collect())
    }

    async fn create_domain_connection(&self, connection: &TgwDomainConnection) -> Result<()> {
        let mut state = self.call(
            "create_domain_connection",
            &[
                &connection.tgw_name1,
                &connection.domain_name1,
                &connection.tgw_name2,
                &connection.domain_name2,
            ],
        )?;
        state.domain_connections.insert((
            connection.tgw_name1.clone(),
            connection.domain_name1.clone(),
            connection.tgw_name2.clone(),
            connection.domain_name2.clone(),
        ));
        Ok(())
    }

    async fn list_connected_domains(
        &self,
        tgw_name: &str,
        domain_name: &str,
    ) -> Result<Vec<String>> {
        let state = self.call("list_connected_domains", &[tgw_name, domain_name])?;
        let mut connected = Vec::new();
        for (t1, d1, t2, d2) in &state.domain_connections {
            if t1 == tgw_name && d1 == domain_name {
                connected.push(format!("{}:{}", t2, d2));
            } else if t2 == tgw_name && d2 == domain_name {
                connected.push(format!("{}:{}", t1, d1));
            }
        }
        Ok(connected)
    }

    async fn delete_domain_connection(&self, connection: &TgwDomainConnection) -> Result<()> {
        let mut state = self.call(
            "delete_domain_connection",
            &[
                &connection.tgw_name1,
                &connection.domain_name1,
                &connection.tgw_name2,
                &connection.domain_name2,
            ],
        )?;
        state.domain_connections.remove(&(
            connection.tgw_name1.clone(),
            connection.domain_name1.clone(),
            connection.tgw_name2.clone(),
            connection.domain_name2.clone(),
        ));
        Ok(())
    }

    // =========================================================================
    // Segmentation
    // =========================================================================

    async fn create_segmentation_connection_policy(
        &self,
        policy: &SegmentationConnectionPolicy,
    ) -> Result<()> {
        let mut state = self.call(
            "create_segmentation_connection_policy",
            &[&policy.domain_name, &policy.other_domain_name],
        )?;
        state
            .segmentation_policies
            .insert((policy.domain_name.clone(), policy.other_domain_name.clone()));
        Ok(())
    }

    async fn get_segmentation_connection_policy(
        &self,
        policy: &SegmentationConnectionPolicy,
    ) -> Result<()> {
        let state = self.call(
            "get_segmentation_connection_policy",
            &[&policy.domain_name, &policy.other_domain_name],
        )?;
        let key = (policy.domain_name.clone(), policy.other_domain_name.clone());
        if state.segmentation_policies.contains(&key) {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }

    async fn delete_segmentation_connection_policy(
        &self,
        policy: &SegmentationConnectionPolicy,
    ) -> Result<()> {
        let mut state = self.call(
            "delete_segmentation_connection_policy",
            &[&policy.domain_name, &policy.other_domain_name],
        )?;
        state
            .segmentation_policies
            .remove(&(policy.domain_name.clone(), policy.other_domain_name.clone()));
        Ok(())
    }

    async fn create_segmentation_domain_association(
        &self,
        association: &SegmentationDomainAssociation,
    ) -> Result<()> {
        let mut state = self.call(
            "create_segmentation_domain_association",
            &[
                &association.transit_gateway_name,
                &association.network_domain_name,
                &association.attachment_name,
            ],
        )?;
        state.segmentation_associations.insert((
            association.transit_gateway_name.clone(),
            association.network_domain_name.clone(),
            association.attachment_name.clone(),
        ));
        Ok(())
    }

    async fn get_segmentation_domain_association(
        &self,
        association: &SegmentationDomainAssociation,
    ) -> Result<()> {
        let state = self.call(
            "get_segmentation_domain_association",
            &[
                &association.transit_gateway_name,
                &association.network_domain_name,
                &association.attachment_name,
            ],
        )?;
        let key = (
            association.transit_gateway_name.clone(),
            association.network_domain_name.clone(),
            association.attachment_name.clone(),
        );
        if state.segmentation_associations.contains(&key) {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }

    async fn delete_segmentation_domain_association(
        &self,
        association: &SegmentationDomainAssociation,
    ) -> Result<()> {
        let mut state = self.call(
            "delete_segmentation_domain_association",
            &[
                &association.transit_gateway_name,
                &association.network_domain_name,
                &association.attachment_name,
            ],
        )?;
        state.segmentation_associations.remove(&(
            association.transit_gateway_name.clone(),
            association.network_domain_name.clone(),
            association.attachment_name.clone(),
        ));
        Ok(())
    }

    // =========================================================================
    // AWS GuardDuty
    // =========================================================================

    async fn enable_aws_guard_duty(&self, account: &AwsGuardDutyAccount) -> Result<()> {
        let mut state = self.call(
            "enable_aws_guard_duty",
            &[&account.account_name, &account.region],
        )?;
        state.guard_duty.insert(
            (account.account_name.clone(), account.region.clone()),
            AwsGuardDutyAccount {
                excluded_ips: Vec::new(),
                ..account.clone()
            },
        );
        Ok(())
    }

    async fn update_aws_guard_duty_excluded_ips(
        &self,
        account: &AwsGuardDutyAccount,
    ) -> Result<()> {
        let ips = account.excluded_ips.join(",");
        let mut state = self.call(
            "update_aws_guard_duty_excluded_ips",
            &[&account.account_name, &account.region, &ips],
        )?;
        let key = (account.account_name.clone(), account.region.clone());
        let entry = state.guard_duty.get_mut(&key).ok_or(Error::NotFound)?;
        entry.excluded_ips = account.excluded_ips.clone();
        Ok(())
    }

    async fn get_aws_guard_duty_account(
        &self,
        account_name: &str,
        region: &str,
    ) -> Result<AwsGuardDutyAccount> {
        let state = self.call("get_aws_guard_duty_account", &[account_name, region])?;
        found(
            state
                .guard_duty
                .get(&(account_name.to_string(), region.to_string())),
        )
    }

    async fn disable_aws_guard_duty(&self, account: &AwsGuardDutyAccount) -> Result<()> {
        let mut state = self.call(
            "disable_aws_guard_duty",
            &[&account.account_name, &account.region],
        )?;
        state
            .guard_duty
            .remove(&(account.account_name.clone(), account.region.clone()));
        Ok(())
    }

    // =========================================================================
    // VPN users
    // =========================================================================

    async fn create_vpn_user(&self, user: &VpnUser) -> Result<()> {
        let mut state = self.call("create_vpn_user", &[&user.user_name])?;
        if state.vpn_users.contains_key(&user.user_name) {
            return Err(Error::api("add_vpn_user", "user already exists"));
        }
        state.vpn_users.insert(user.user_name.clone(), user.clone());
        Ok(())
    }

    async fn get_vpn_user(&self, user_name: &str) -> Result<VpnUser> {
        let state = self.call("get_vpn_user", &[user_name])?;
        found(state.vpn_users.get(user_name))
    }

    async fn delete_vpn_user(&self, user: &VpnUser) -> Result<()> {
        let mut state = self.call("delete_vpn_user", &[&user.user_name])?;
        state.vpn_users.remove(&user.user_name);
        Ok(())
    }

    async fn attach_vpn_user_to_profile(&self, user_name: &str, profile: &str) -> Result<()> {
        let mut state = self.call("attach_vpn_user_to_profile", &[user_name, profile])?;
        let user = state.vpn_users.get_mut(user_name).ok_or(Error::NotFound)?;
        if !user.profiles.iter().any(|p| p == profile) {
            user.profiles.push(profile.to_string());
        }
        Ok(())
    }

    async fn detach_vpn_user_from_profile(&self, user_name: &str, profile: &str) -> Result<()> {
        let mut state = self.call("detach_vpn_user_from_profile", &[user_name, profile])?;
        let user = state.vpn_users.get_mut(user_name).ok_or(Error::NotFound)?;
        user.profiles.retain(|p| p != profile);
        Ok(())
    }

    // =========================================================================
    // RBAC
    // =========================================================================

    async fn add_access_accounts_to_rbac_group(
        &self,
        membership: &RbacGroupAccessAccounts,
    ) -> Result<()> {
        let accounts = membership.access_account_names.join(",");
        let mut state = self.call(
            "add_access_accounts_to_rbac_group",
            &[&membership.group_name, &accounts],
        )?;
        state
            .rbac_groups
            .entry(membership.group_name.clone())
            .or_default()
            .extend(membership.access_account_names.iter().cloned());
        Ok(())
    }

    async fn list_access_accounts_in_rbac_group(&self, group_name: &str) -> Result<Vec<String>> {
        let state = self.call("list_access_accounts_in_rbac_group", &[group_name])?;
        let accounts = state.rbac_groups.get(group_name).ok_or(Error::NotFound)?;
        Ok(accounts.iter().cloned().collect())
    }

    async fn delete_access_accounts_from_rbac_group(
        &self,
        membership: &RbacGroupAccessAccounts,
    ) -> Result<()> {
        let accounts = membership.access_account_names.join(",");
        let mut state = self.call(
            "delete_access_accounts_from_rbac_group",
            &[&membership.group_name, &accounts],
        )?;
        if let Some(group) = state.rbac_groups.get_mut(&membership.group_name) {
            for account in &membership.access_account_names {
                group.remove(account);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Distributed firewalling
    // =========================================================================

    async fn update_distributed_firewalling_policy_list(
        &self,
        policies: &DistributedFirewallingPolicyList,
    ) -> Result<()> {
        let count = policies.policies.len().to_string();
        let mut state = self.call("update_distributed_firewalling_policy_list", &[&count])?;
        let mut stored = policies.clone();
        for policy in &mut stored.policies {
            if policy.uuid.is_none() {
                state.next_uuid += 1;
                policy.uuid = Some(format!("policy-{}", state.next_uuid));
            }
        }
        state.dcf_policies = Some(stored);
        Ok(())
    }

    async fn get_distributed_firewalling_policy_list(
        &self,
    ) -> Result<DistributedFirewallingPolicyList> {
        let state = self.call("get_distributed_firewalling_policy_list", &[])?;
        found(state.dcf_policies.as_ref())
    }

    async fn delete_distributed_firewalling_policy_list(&self) -> Result<()> {
        let mut state = self.call("delete_distributed_firewalling_policy_list", &[])?;
        state.dcf_policies = None;
        Ok(())
    }

    async fn update_distributed_firewalling_default_action_rule(
        &self,
        rule: &DefaultActionRule,
    ) -> Result<()> {
        let logging = rule.logging.to_string();
        let mut state = self.call(
            "update_distributed_firewalling_default_action_rule",
            &[rule.action.as_str(), &logging, &rule.log_profile],
        )?;
        state.default_action_rule = rule.clone();
        Ok(())
    }

    async fn get_distributed_firewalling_default_action_rule(&self) -> Result<DefaultActionRule> {
        let state = self.call("get_distributed_firewalling_default_action_rule", &[])?;
        Ok(state.default_action_rule.clone())
    }

    async fn update_distributed_firewalling_intra_vpc(&self, vpcs: &IntraVpcList) -> Result<()> {
        let ids: Vec<&str> = vpcs.vpcs.iter().map(|v| v.vpc_id.as_str()).collect();
        let mut state = self.call("update_distributed_firewalling_intra_vpc", &ids)?;
        state.intra_vpcs = vpcs.clone();
        Ok(())
    }

    async fn get_distributed_firewalling_intra_vpc(&self) -> Result<IntraVpcList> {
        let state = self.call("get_distributed_firewalling_intra_vpc", &[])?;
        if state.intra_vpcs.vpcs.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(state.intra_vpcs.clone())
    }

    async fn delete_distributed_firewalling_intra_vpc(&self) -> Result<()> {
        let mut state = self.call("delete_distributed_firewalling_intra_vpc", &[])?;
        state.intra_vpcs = IntraVpcList::default();
        Ok(())
    }

    // =========================================================================
    // Controller settings
    // =========================================================================

    async fn set_controller_bgp_max_as_limit(&self, limit: i64) -> Result<()> {
        let mut state = self.call("set_controller_bgp_max_as_limit", &[&limit.to_string()])?;
        state.bgp_max_as_limit.max_as_limit = Some(limit);
        Ok(())
    }

    async fn disable_controller_bgp_max_as_limit(&self) -> Result<()> {
        let mut state = self.call("disable_controller_bgp_max_as_limit", &[])?;
        state.bgp_max_as_limit.max_as_limit = None;
        Ok(())
    }

    async fn set_controller_bgp_max_as_limit_non_rfc1918(&self, limit: i64) -> Result<()> {
        let mut state = self.call(
            "set_controller_bgp_max_as_limit_non_rfc1918",
            &[&limit.to_string()],
        )?;
        state.bgp_max_as_limit.max_as_limit_non_rfc1918 = Some(limit);
        Ok(())
    }

    async fn disable_controller_bgp_max_as_limit_non_rfc1918(&self) -> Result<()> {
        let mut state = self.call("disable_controller_bgp_max_as_limit_non_rfc1918", &[])?;
        state.bgp_max_as_limit.max_as_limit_non_rfc1918 = None;
        Ok(())
    }

    async fn get_controller_bgp_max_as_limit(&self) -> Result<BgpMaxAsLimit> {
        let state = self.call("get_controller_bgp_max_as_limit", &[])?;
        Ok(state.bgp_max_as_limit)
    }

    // =========================================================================
    // CoPilot
    // =========================================================================

    async fn create_copilot_simple(&self, deployment: &CopilotSimpleDeployment) -> Result<()> {
        let mut state = self.call(
            "create_copilot_simple",
            &[&deployment.account_name, &deployment.vpc_id],
        )?;
        state.copilot = Some(deployment.clone());
        Ok(())
    }

    async fn get_copilot_association_status(&self) -> Result<CopilotAssociationStatus> {
        let mut state = self.call("get_copilot_association_status", &[])?;
        if state.copilot.is_none() {
            return Err(Error::NotFound);
        }
        if state.copilot_pending_polls > 0 {
            state.copilot_pending_polls -= 1;
            return Err(Error::NotFound);
        }
        Ok(CopilotAssociationStatus {
            status: true,
            private_ip: "10.0.0.10".to_string(),
            public_ip: "54.1.2.3".to_string(),
        })
    }

    async fn delete_copilot_simple(&self) -> Result<()> {
        let mut state = self.call("delete_copilot_simple", &[])?;
        state.copilot = None;
        Ok(())
    }

    // =========================================================================
    // Edge spoke gateways
    // =========================================================================

    /// Registration only takes the interface settings; everything else starts
    /// at the controller defaults until set by a follow-up call
    async fn create_edge_spoke(&self, gateway: &EdgeSpoke) -> Result<()> {
        let mut state = self.call("create_edge_spoke", &[&gateway.gw_name])?;
        state.edge_spokes.insert(
            gateway.gw_name.clone(),
            EdgeSpoke {
                wan_public_ip: EDGE_DISCOVERED_WAN_IP.to_string(),
                local_as_number: String::new(),
                prepend_as_path: Vec::new(),
                enable_learned_cidrs_approval: false,
                approved_learned_cidrs: Vec::new(),
                bgp_manual_advertise_cidrs: Vec::new(),
                enable_preserve_as_path: false,
                bgp_polling_time: 50,
                bgp_hold_time: 180,
                enable_edge_transitive_routing: false,
                enable_jumbo_frame: false,
                latitude: 0.0,
                longitude: 0.0,
                state: "up".to_string(),
                ..gateway.clone()
            },
        );
        Ok(())
    }

    async fn get_edge_spoke(&self, gw_name: &str) -> Result<EdgeSpoke> {
        let state = self.call("get_edge_spoke", &[gw_name])?;
        found(state.edge_spokes.get(gw_name))
    }

    async fn delete_edge_spoke(&self, gw_name: &str) -> Result<()> {
        let mut state = self.call("delete_edge_spoke", &[gw_name])?;
        state.edge_spokes.remove(gw_name);
        Ok(())
    }

    async fn set_edge_spoke_local_as_number(&self, gw_name: &str, asn: &str) -> Result<()> {
        let mut state = self.call("set_edge_spoke_local_as_number", &[gw_name, asn])?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        if !gateway.prepend_as_path.is_empty() && gateway.local_as_number != asn {
            return Err(Error::api(
                "edit_transit_gateway_local_as_number",
                "prepend AS path must be cleared first",
            ));
        }
        gateway.local_as_number = asn.to_string();
        Ok(())
    }

    async fn set_edge_spoke_prepend_as_path(&self, gw_name: &str, path: &[String]) -> Result<()> {
        let joined = path.join(" ");
        let mut state = self.call("set_edge_spoke_prepend_as_path", &[gw_name, &joined])?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        if path.iter().any(|asn| *asn != gateway.local_as_number) {
            return Err(Error::api(
                "edit_aviatrix_transit_advanced_config",
                "prepend AS path must only contain the local AS number",
            ));
        }
        gateway.prepend_as_path = path.to_vec();
        Ok(())
    }

    async fn set_edge_spoke_learned_cidrs_approval(
        &self,
        gw_name: &str,
        enabled: bool,
    ) -> Result<()> {
        let mut state = self.call(
            "set_edge_spoke_learned_cidrs_approval",
            &[gw_name, &enabled.to_string()],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.enable_learned_cidrs_approval = enabled;
        if !enabled {
            gateway.approved_learned_cidrs.clear();
        }
        Ok(())
    }

    async fn update_edge_spoke_approved_learned_cidrs(
        &self,
        gw_name: &str,
        cidrs: &[String],
    ) -> Result<()> {
        let joined = cidrs.join(",");
        let mut state = self.call(
            "update_edge_spoke_approved_learned_cidrs",
            &[gw_name, &joined],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.approved_learned_cidrs = cidrs.to_vec();
        Ok(())
    }

    async fn update_edge_spoke_active_standby(
        &self,
        gw_name: &str,
        mode: Option<ActiveStandbyMode>,
    ) -> Result<()> {
        let rendered = format!("{:?}", mode);
        let mut state = self.call("update_edge_spoke_active_standby", &[gw_name, &rendered])?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.active_standby = mode;
        Ok(())
    }

    async fn update_edge_spoke_ip_configurations(&self, gateway: &EdgeSpoke) -> Result<()> {
        let mut state = self.call(
            "update_edge_spoke_ip_configurations",
            &[
                &gateway.gw_name,
                &gateway.wan_interface_ip_prefix,
                &gateway.wan_default_gateway_ip,
                &gateway.lan_interface_ip_prefix,
                &gateway.management_egress_ip_prefix,
                &gateway.wan_public_ip,
            ],
        )?;
        let stored = state
            .edge_spokes
            .get_mut(&gateway.gw_name)
            .ok_or(Error::NotFound)?;
        stored.wan_interface_ip_prefix = gateway.wan_interface_ip_prefix.clone();
        stored.wan_default_gateway_ip = gateway.wan_default_gateway_ip.clone();
        stored.lan_interface_ip_prefix = gateway.lan_interface_ip_prefix.clone();
        stored.management_egress_ip_prefix = gateway.management_egress_ip_prefix.clone();
        if !gateway.wan_public_ip.is_empty() {
            stored.wan_public_ip = gateway.wan_public_ip.clone();
        }
        Ok(())
    }

    async fn set_edge_spoke_bgp_manual_advertise_cidrs(
        &self,
        gw_name: &str,
        cidrs: &[String],
    ) -> Result<()> {
        let joined = cidrs.join(",");
        let mut state = self.call(
            "set_edge_spoke_bgp_manual_advertise_cidrs",
            &[gw_name, &joined],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.bgp_manual_advertise_cidrs = cidrs.to_vec();
        Ok(())
    }

    async fn set_edge_spoke_preserve_as_path(&self, gw_name: &str, enabled: bool) -> Result<()> {
        let mut state = self.call(
            "set_edge_spoke_preserve_as_path",
            &[gw_name, &enabled.to_string()],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.enable_preserve_as_path = enabled;
        Ok(())
    }

    async fn set_edge_spoke_bgp_polling_time(&self, gw_name: &str, seconds: i64) -> Result<()> {
        let mut state = self.call(
            "set_edge_spoke_bgp_polling_time",
            &[gw_name, &seconds.to_string()],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.bgp_polling_time = seconds;
        Ok(())
    }

    async fn set_edge_spoke_bgp_hold_time(&self, gw_name: &str, seconds: i64) -> Result<()> {
        let mut state = self.call(
            "set_edge_spoke_bgp_hold_time",
            &[gw_name, &seconds.to_string()],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.bgp_hold_time = seconds;
        Ok(())
    }

    async fn set_edge_spoke_transitive_routing(&self, gw_name: &str, enabled: bool) -> Result<()> {
        let mut state = self.call(
            "set_edge_spoke_transitive_routing",
            &[gw_name, &enabled.to_string()],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.enable_edge_transitive_routing = enabled;
        Ok(())
    }

    async fn set_edge_spoke_jumbo_frame(&self, gw_name: &str, enabled: bool) -> Result<()> {
        let mut state = self.call(
            "set_edge_spoke_jumbo_frame",
            &[gw_name, &enabled.to_string()],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.enable_jumbo_frame = enabled;
        Ok(())
    }

    async fn update_edge_spoke_geo_coordinate(
        &self,
        gw_name: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<()> {
        let mut state = self.call(
            "update_edge_spoke_geo_coordinate",
            &[gw_name, &latitude.to_string(), &longitude.to_string()],
        )?;
        let gateway = state.edge_spokes.get_mut(gw_name).ok_or(Error::NotFound)?;
        gateway.latitude = latitude;
        gateway.longitude = longitude;
        Ok(())
    }

    // =========================================================================
    // Smart groups
    // =========================================================================

    async fn create_smart_group(&self, group: &SmartGroup) -> Result<String> {
        let mut state = self.call("create_smart_group", &[&group.name])?;
        state.next_uuid += 1;
        let uuid = format!("sg-{}", state.next_uuid);
        state.smart_groups.insert(
            uuid.clone(),
            SmartGroup {
                uuid: uuid.clone(),
                ..group.clone()
            },
        );
        Ok(uuid)
    }

    async fn get_smart_group(&self, uuid: &str) -> Result<SmartGroup> {
        let state = self.call("get_smart_group", &[uuid])?;
        found(state.smart_groups.get(uuid))
    }

    async fn update_smart_group(&self, uuid: &str, group: &SmartGroup) -> Result<()> {
        let mut state = self.call("update_smart_group", &[uuid, &group.name])?;
        let stored = state.smart_groups.get_mut(uuid).ok_or(Error::NotFound)?;
        *stored = SmartGroup {
            uuid: uuid.to_string(),
            ..group.clone()
        };
        Ok(())
    }

    async fn delete_smart_group(&self, uuid: &str) -> Result<()> {
        let mut state = self.call("delete_smart_group", &[uuid])?;
        state.smart_groups.remove(uuid);
        Ok(())
    }

    async fn list_smart_groups(&self) -> Result<Vec<SmartGroup>> {
        let state = self.call("list_smart_groups", &[])?;
        Ok(state.smart_groups.values().cloned().collect())
    }
}
