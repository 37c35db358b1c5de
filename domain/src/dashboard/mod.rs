//! Dashboard domain: invoice/customer demo data and revenue charting.

pub mod chart;
pub mod entities;
pub mod summary;
