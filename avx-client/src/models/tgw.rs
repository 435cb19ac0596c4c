//! AWS Transit Gateway models

use serde::{Deserialize, Serialize};

/// Domains every TGW carries; deleting them requires `force_delete`
pub const DEFAULT_NETWORK_DOMAINS: [&str; 3] = [
    "Aviatrix_Edge_Domain",
    "Default_Domain",
    "Shared_Service_Domain",
];

/// Peering between two AWS TGWs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsTgwPeering {
    pub tgw_name1: String,
    pub tgw_name2: String,
}

/// VPC of an Aviatrix transit gateway attached to an AWS TGW
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsTgwTransitGatewayAttachment {
    pub tgw_name: String,
    pub region: String,
    #[serde(rename = "acct_name")]
    pub vpc_account_name: String,
    pub vpc_id: String,
    #[serde(rename = "avx_gw_name")]
    pub transit_gateway_name: String,
}

/// Network (route) domain on an AWS TGW
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDomain {
    #[serde(rename = "route_domain_name")]
    pub name: String,
    pub tgw_name: String,
    #[serde(default)]
    pub aviatrix_firewall: bool,
    #[serde(default)]
    pub native_egress: bool,
    #[serde(default)]
    pub native_firewall: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_delete: bool,
}

impl NetworkDomain {
    pub fn is_default_domain(&self) -> bool {
        DEFAULT_NETWORK_DOMAINS.contains(&self.name.as_str())
    }
}

/// Connection between domains on two peered TGWs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TgwDomainConnection {
    pub tgw_name1: String,
    pub domain_name1: String,
    pub tgw_name2: String,
    pub domain_name2: String,
}

impl TgwDomainConnection {
    /// Destination written as `tgw:domain`, the way the controller lists connections
    pub fn destination(&self) -> String {
        format!("{}:{}", self.tgw_name2, self.domain_name2)
    }
}

/// One entry of the controller-wide network domain listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDomainSummary {
    pub name: String,
    #[serde(default)]
    pub tgw_name: String,
    #[serde(default)]
    pub route_table_id: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub cloud_type: i64,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub intra_domain_inspection: bool,
    #[serde(default)]
    pub egress_inspection: bool,
    #[serde(default)]
    pub inspection_policy: String,
    #[serde(default)]
    pub intra_domain_inspection_name: String,
    #[serde(default)]
    pub egress_inspection_name: String,
    #[serde(rename = "type", default)]
    pub domain_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domains_are_recognised() {
        let domain = NetworkDomain {
            name: "Default_Domain".to_string(),
            tgw_name: "tgw1".to_string(),
            ..Default::default()
        };
        assert!(domain.is_default_domain());
    }

    #[test]
    fn force_delete_only_serialized_when_set() {
        let mut domain = NetworkDomain {
            name: "prod".to_string(),
            tgw_name: "tgw1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&domain).unwrap();
        assert!(json.get("force_delete").is_none());
        assert_eq!(json["route_domain_name"], "prod");

        domain.force_delete = true;
        let json = serde_json::to_value(&domain).unwrap();
        assert_eq!(json["force_delete"], true);
    }
}
