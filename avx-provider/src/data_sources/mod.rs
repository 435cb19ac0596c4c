//! Data sources
//!
//! Read-only lookups identified by the controller they were read from.

pub mod network_domains;
pub mod smart_groups;

use crate::handler::DataSourceHandler;

/// Returns a handler for every data source type
pub fn handlers() -> Vec<Box<dyn DataSourceHandler>> {
    vec![
        Box::new(network_domains::NetworkDomains),
        Box::new(smart_groups::SmartGroups),
    ]
}

/// Look up the handler for a data source type
pub fn find(data_source_type: &str) -> Option<Box<dyn DataSourceHandler>> {
    handlers()
        .into_iter()
        .find(|h| h.type_name() == data_source_type)
}
