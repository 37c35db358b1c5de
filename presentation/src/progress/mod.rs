//! Progress reporting for query sessions

pub mod reporter;
