//! Query session domain.
//!
//! - [`entities::QuerySession`]: one request/response exchange and its text
//! - [`status::SessionStatus`]: the session state machine
//! - [`stream::StreamEvent`]: events delivered by a streaming transport
//! - [`mode::ResponseMode`]: streaming vs single-shot requests

pub mod entities;
pub mod mode;
pub mod status;
pub mod stream;
