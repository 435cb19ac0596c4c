//! Aviatrix Controller Client Interface
//!
//! This crate describes what the provider needs from a controller, without
//! committing to a transport.
//!
//! # Overview
//!
//! - **ControllerApi**: async trait with one method per remote operation
//! - **models**: plain request/response structs with serde mappings to the
//!   controller's field names
//! - **Error**: client errors, including the `NotFound` sentinel that reads
//!   use to signal a missing object

pub mod api;
pub mod error;
pub mod models;

// Re-export main types for convenience
pub use api::ControllerApi;
pub use error::{Error, Result};
