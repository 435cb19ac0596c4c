//! CoPilot deployment models

use serde::{Deserialize, Serialize};

/// Single-instance CoPilot deployment request
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopilotSimpleDeployment {
    pub cloud_type: i64,
    pub account_name: String,
    #[serde(rename = "vpc_region")]
    pub region: String,
    pub vpc_id: String,
    #[serde(rename = "subnet_cidr")]
    pub subnet: String,
    pub controller_service_account_username: String,
    pub controller_service_account_password: String,
    pub instance_size: String,
    pub data_volume_size: i64,
}

impl std::fmt::Debug for CopilotSimpleDeployment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopilotSimpleDeployment")
            .field("cloud_type", &self.cloud_type)
            .field("account_name", &self.account_name)
            .field("region", &self.region)
            .field("vpc_id", &self.vpc_id)
            .field("subnet", &self.subnet)
            .field(
                "controller_service_account_username",
                &self.controller_service_account_username,
            )
            .field("controller_service_account_password", &"<redacted>")
            .field("instance_size", &self.instance_size)
            .field("data_volume_size", &self.data_volume_size)
            .finish()
    }
}

/// Association between the controller and its CoPilot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopilotAssociationStatus {
    pub status: bool,
    #[serde(rename = "ip", default)]
    pub private_ip: String,
    #[serde(default)]
    pub public_ip: String,
}
