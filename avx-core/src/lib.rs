//! Aviatrix Core
//!
//! Building blocks shared by the provider: the value model, schema
//! declaration, typed field access, composite identifiers, change
//! detection, and the `Provider` trait.

pub mod differ;
pub mod fields;
pub mod identifier;
pub mod provider;
pub mod resource;
pub mod schema;
