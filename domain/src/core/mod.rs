//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: text-generation model identifiers
//! - [`query::Query`]: the free-text input of a session
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod query;
