//! Dashboard view: invoice cards and a revenue chart

mod render;

pub use render::{DashboardView, WELCOME};
