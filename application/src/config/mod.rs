//! Application-level configuration.
//!
//! - [`SessionParams`]: per-session request parameters (model, mode, timeout)

pub mod session_params;

pub use session_params::SessionParams;
