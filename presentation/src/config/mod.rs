//! Presentation-level configuration
//!
//! Configuration for output formatting and chat behavior.

use querydash_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Stream fragments as text, or print one JSON snapshot at the end
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the spinner while waiting for the first fragment
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Apply the color setting to everything printed through `colored`.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
