//! Request mode value object

use serde::{Deserialize, Serialize};

/// How the service is asked to deliver its answer.
///
/// The service may still answer a streaming request with one complete text;
/// both shapes end the session normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseMode {
    /// Incremental fragments (default)
    #[default]
    Streaming,
    /// One complete response
    SingleShot,
}

impl ResponseMode {
    pub fn is_streaming(&self) -> bool {
        matches!(self, ResponseMode::Streaming)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Streaming => "streaming",
            ResponseMode::SingleShot => "single-shot",
        }
    }
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "streaming" | "stream" => Ok(ResponseMode::Streaming),
            "single-shot" | "single_shot" | "singleshot" => Ok(ResponseMode::SingleShot),
            other => Err(format!("unknown response mode: {}", other)),
        }
    }
}
