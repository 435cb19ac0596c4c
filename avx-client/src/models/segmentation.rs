//! Multi-cloud segmentation models

use serde::{Deserialize, Serialize};

/// Connection policy between two network domains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationConnectionPolicy {
    pub domain_name: String,
    pub other_domain_name: String,
}

/// Association of a transit attachment with a network domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationDomainAssociation {
    pub transit_gateway_name: String,
    #[serde(rename = "domain_name")]
    pub network_domain_name: String,
    pub attachment_name: String,
}
