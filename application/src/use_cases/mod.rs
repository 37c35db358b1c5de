//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod query_controller;
pub mod stream_query;

#[cfg(test)]
pub(crate) mod test_support;
