//! Edge spoke gateway models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagementInterface {
    #[default]
    #[serde(rename = "DHCP")]
    Dhcp,
    #[serde(rename = "Static")]
    Static,
}

impl ManagementInterface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dhcp => "DHCP",
            Self::Static => "Static",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZtpFileType {
    #[default]
    #[serde(rename = "iso")]
    Iso,
    #[serde(rename = "cloud-init")]
    CloudInit,
}

impl ZtpFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iso => "iso",
            Self::CloudInit => "cloud-init",
        }
    }
}

/// Failover behaviour of an active-standby edge pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveStandbyMode {
    Preemptive,
    NonPreemptive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpoke {
    pub gw_name: String,
    pub site_id: String,
    pub ztp_file_type: ZtpFileType,
    pub ztp_file_download_path: String,
    pub management_interface: ManagementInterface,
    #[serde(default)]
    pub management_interface_ip_prefix: String,
    #[serde(default)]
    pub management_default_gateway_ip: String,
    #[serde(default)]
    pub dns_server_ip: String,
    #[serde(default)]
    pub secondary_dns_server_ip: String,
    pub wan_interface_ip_prefix: String,
    pub wan_default_gateway_ip: String,
    pub lan_interface_ip_prefix: String,
    #[serde(default)]
    pub management_egress_ip_prefix: String,
    #[serde(default)]
    pub enable_over_private_network: bool,
    /// Public IP the WAN interface is reached on
    #[serde(default, rename = "wan_discovery_ip")]
    pub wan_public_ip: String,
    #[serde(default)]
    pub local_as_number: String,
    #[serde(default)]
    pub prepend_as_path: Vec<String>,
    #[serde(default)]
    pub enable_learned_cidrs_approval: bool,
    #[serde(default)]
    pub approved_learned_cidrs: Vec<String>,
    #[serde(default)]
    pub active_standby: Option<ActiveStandbyMode>,
    #[serde(default)]
    pub bgp_manual_advertise_cidrs: Vec<String>,
    #[serde(default)]
    pub enable_preserve_as_path: bool,
    /// Seconds
    #[serde(default)]
    pub bgp_polling_time: i64,
    /// Seconds
    #[serde(default)]
    pub bgp_hold_time: i64,
    #[serde(default)]
    pub enable_edge_transitive_routing: bool,
    #[serde(default)]
    pub enable_jumbo_frame: bool,
    #[serde(default, rename = "geo_latitude")]
    pub latitude: f64,
    #[serde(default, rename = "geo_longitude")]
    pub longitude: f64,
    /// Gateway state reported by the controller
    #[serde(default)]
    pub state: String,
}
