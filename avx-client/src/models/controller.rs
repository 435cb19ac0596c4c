//! Controller-wide settings

use serde::{Deserialize, Serialize};

/// BGP AS-path length limits; `None` means the limit is disabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpMaxAsLimit {
    pub max_as_limit: Option<i64>,
    pub max_as_limit_non_rfc1918: Option<i64>,
}
