//! VPN user models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnUser {
    #[serde(default)]
    pub vpc_id: String,
    #[serde(rename = "lb_name", default)]
    pub gw_name: String,
    #[serde(rename = "username")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub saml_endpoint: String,
    #[serde(default)]
    pub profiles: Vec<String>,
}
