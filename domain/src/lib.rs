//! Domain layer for querydash
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Query Session
//!
//! A [`QuerySession`] is one request/response exchange with a text-generation
//! service. Its [`SessionStatus`] follows a small state machine:
//!
//! ```text
//! idle -> sending -> streaming -> completed
//!           |            |
//!           +--> failed / cancelled <--+
//! ```
//!
//! Fragments are applied in arrival order and are discarded once the session
//! has reached a terminal status.
//!
//! ## Dashboard
//!
//! Customers, invoices and monthly revenue used by the dashboard view, plus
//! the bar scaling rule used to chart revenue.

pub mod config;
pub mod core;
pub mod dashboard;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, model::Model, query::Query};
pub use dashboard::{
    chart::{bar_height, BarChart, ChartBar},
    entities::{Customer, Invoice, InvoiceStatus, Revenue},
    summary::InvoiceSummary,
};
pub use session::{
    entities::{FragmentOutcome, QuerySession, SessionId, SessionSnapshot},
    mode::ResponseMode,
    status::SessionStatus,
    stream::StreamEvent,
};
