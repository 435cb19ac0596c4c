//! RBAC group models

use serde::{Deserialize, Serialize};

/// Access accounts attached to an RBAC permission group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacGroupAccessAccounts {
    pub group_name: String,
    #[serde(rename = "accounts")]
    pub access_account_names: Vec<String>,
}
