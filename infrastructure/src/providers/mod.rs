//! Text generation adapters implementing the
//! [`TextGenerator`](querydash_application::TextGenerator) port.

pub mod openai_compat;
pub mod scripted;

use crate::config::FileProviderConfig;
use querydash_application::ports::text_generator::{GatewayError, TextGenerator};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub use openai_compat::{OpenAiCompatConfig, OpenAiCompatGenerator};
pub use scripted::ScriptedGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Any OpenAI-compatible HTTP endpoint
    #[default]
    OpenAi,
    /// Offline playback
    Scripted,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Scripted => "scripted",
        }
    }

    pub fn valid_values() -> Vec<String> {
        vec!["openai".to_string(), "scripted".to_string()]
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "openai-compatible" => Ok(ProviderKind::OpenAi),
            "scripted" => Ok(ProviderKind::Scripted),
            other => Err(format!("unknown provider kind: {}", other)),
        }
    }
}

/// Build the generator for `kind` from the `[provider]` section.
pub fn build_generator(
    kind: ProviderKind,
    config: &FileProviderConfig,
    channel_capacity: usize,
) -> Result<Arc<dyn TextGenerator>, GatewayError> {
    info!("Using {} text generation provider", kind);
    let generator: Arc<dyn TextGenerator> = match kind {
        ProviderKind::OpenAi => Arc::new(OpenAiCompatGenerator::new(OpenAiCompatConfig {
            base_url: config.base_url.clone(),
            api_key: config.resolve_api_key(),
            api_key_env: config.api_key_env.clone(),
            channel_capacity,
        })?),
        ProviderKind::Scripted => Arc::new(
            ScriptedGenerator::new(
                config.scripted_reply.clone(),
                Duration::from_millis(config.scripted_delay_ms),
            )
            .with_channel_capacity(channel_capacity),
        ),
    };
    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [ProviderKind::OpenAi, ProviderKind::Scripted] {
            assert_eq!(kind.as_str().parse::<ProviderKind>(), Ok(kind));
        }
        assert!("ollama".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_build_scripted_generator() {
        let config = FileProviderConfig::default();
        let generator = build_generator(ProviderKind::Scripted, &config, 4).unwrap();
        assert_eq!(generator.name(), "scripted");
        assert!(generator.availability().is_ready());
    }

    #[test]
    fn test_openai_without_key_reports_failed_availability() {
        let config = FileProviderConfig {
            api_key_env: "QUERYDASH_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        let generator = build_generator(ProviderKind::OpenAi, &config, 4).unwrap();
        assert!(!generator.availability().is_ready());
    }
}
