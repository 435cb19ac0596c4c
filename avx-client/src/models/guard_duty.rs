//! AWS GuardDuty models

use serde::{Deserialize, Serialize};

/// GuardDuty scanning enabled for one account in one region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsGuardDutyAccount {
    #[serde(rename = "account")]
    pub account_name: String,
    pub region: String,
    #[serde(rename = "exempt_ips", default)]
    pub excluded_ips: Vec<String>,
}
