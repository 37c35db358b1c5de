//! Bar chart scaling.

use super::entities::Revenue;
use serde::Serialize;

/// Height of a bar for `value` when `max_value` maps to `height`.
///
/// Bars never shrink below 1 so that small (or zero) values stay visible.
/// A non-positive `max_value` yields minimum-height bars.
pub fn bar_height(value: f64, max_value: f64, height: f64) -> f64 {
    if max_value <= 0.0 {
        return 1.0;
    }
    ((height / max_value) * value).max(1.0)
}

/// One scaled bar of a [`BarChart`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: u64,
    pub height: f64,
}

/// Revenue scaled to a fixed chart height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub height: f64,
    pub max_value: u64,
    pub bars: Vec<ChartBar>,
}

impl BarChart {
    pub fn from_revenue(revenue: &[Revenue], height: f64) -> Self {
        let max_value = revenue.iter().map(|r| r.revenue).max().unwrap_or(0);
        let bars = revenue
            .iter()
            .map(|r| ChartBar {
                label: r.month.clone(),
                value: r.revenue,
                height: bar_height(r.revenue as f64, max_value as f64, height),
            })
            .collect();

        Self {
            height,
            max_value,
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
