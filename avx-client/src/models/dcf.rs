//! Distributed firewalling models

use serde::{Deserialize, Serialize};

/// Protocol matched by a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[serde(rename = "TCP")]
    Tcp,
    #[serde(rename = "UDP")]
    Udp,
    #[serde(rename = "ICMP")]
    Icmp,
    /// Any protocol; configured as "ANY"
    #[serde(rename = "PROTOCOL_UNSPECIFIED")]
    Unspecified,
}

impl Protocol {
    /// Parse a configured protocol, ignoring case
    pub fn from_config(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "TCP" => Some(Self::Tcp),
            "UDP" => Some(Self::Udp),
            "ICMP" => Some(Self::Icmp),
            "ANY" | "PROTOCOL_UNSPECIFIED" => Some(Self::Unspecified),
            _ => None,
        }
    }

    /// Value reported back to the configuration
    pub fn config_name(&self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
            Self::Icmp => "ICMP",
            Self::Unspecified => "ANY",
        }
    }

    /// Value the controller expects
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "PROTOCOL_UNSPECIFIED",
            other => other.config_name(),
        }
    }
}

/// Verdict of a policy or of the default rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyAction {
    #[default]
    Permit,
    Deny,
}

impl PolicyAction {
    /// Parse a configured action, ignoring case
    pub fn from_config(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PERMIT" => Some(Self::Permit),
            "DENY" => Some(Self::Deny),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permit => "PERMIT",
            Self::Deny => "DENY",
        }
    }
}

/// Inclusive port range; `hi` absent means a single port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    pub lo: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedFirewallingPolicy {
    pub name: String,
    pub action: PolicyAction,
    pub priority: i64,
    pub protocol: Protocol,
    #[serde(default)]
    pub src_smart_groups: Vec<String>,
    #[serde(default)]
    pub dst_smart_groups: Vec<String>,
    #[serde(default)]
    pub logging: bool,
    #[serde(default)]
    pub watch: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port_ranges: Vec<PortRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributedFirewallingPolicyList {
    pub policies: Vec<DistributedFirewallingPolicy>,
}

/// Rule applied to traffic no policy matched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultActionRule {
    pub action: PolicyAction,
    pub logging: bool,
    #[serde(default)]
    pub log_profile: String,
}

/// VPC with intra-VPC distributed firewalling enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntraVpc {
    pub account_name: String,
    pub vpc_id: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntraVpcList {
    pub vpcs: Vec<IntraVpc>,
}
