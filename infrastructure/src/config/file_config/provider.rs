//! Provider configuration from TOML (`[provider]` section)

use crate::providers::ProviderKind;
use querydash_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Text generation backend settings.
///
/// # Example
///
/// ```toml
/// [provider]
/// kind = "openai"                        # or "scripted" (offline)
/// base_url = "https://api.deepseek.com"
/// api_key_env = "DEEPSEEK_API_KEY"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// "openai" (any OpenAI-compatible endpoint) or "scripted".
    pub kind: String,
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    /// Reply of the scripted provider. Echoes the prompt when unset.
    pub scripted_reply: Option<String>,
    /// Delay between scripted fragments, in milliseconds.
    pub scripted_delay_ms: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default().as_str().to_string(),
            base_url: "https://api.deepseek.com".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            api_key: None,
            scripted_reply: None,
            scripted_delay_ms: 40,
        }
    }
}

impl FileProviderConfig {
    /// Parse the provider kind, falling back to the default on unknown values.
    pub fn parse_kind(&self) -> (ProviderKind, Vec<ConfigIssue>) {
        match self.kind.parse::<ProviderKind>() {
            Ok(kind) => (kind, Vec::new()),
            Err(_) => {
                let fallback = ProviderKind::default();
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "provider.kind".to_string(),
                        value: self.kind.clone(),
                        valid_values: ProviderKind::valid_values(),
                    },
                    format!(
                        "provider.kind: unknown value '{}', falling back to '{}'",
                        self.kind, fallback
                    ),
                );
                (fallback, vec![issue])
            }
        }
    }

    /// API key from the direct value, else from `api_key_env`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    /// Issues for the effective `kind`, which the CLI may have overridden.
    pub fn validate_for(&self, kind: ProviderKind) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if kind == ProviderKind::OpenAi && self.resolve_api_key().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingApiKey {
                    env: self.api_key_env.clone(),
                },
                format!(
                    "provider: no API key found; set {} or provider.api_key",
                    self.api_key_env
                ),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_falls_back_with_warning() {
        let config = FileProviderConfig {
            kind: "bedrock".to_string(),
            ..Default::default()
        };
        let (kind, issues) = config.parse_kind();
        assert_eq!(kind, ProviderKind::OpenAi);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_scripted_kind_parses() {
        let config = FileProviderConfig {
            kind: "Scripted".to_string(),
            ..Default::default()
        };
        let (kind, issues) = config.parse_kind();
        assert_eq!(kind, ProviderKind::Scripted);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_direct_api_key_wins() {
        let config = FileProviderConfig {
            api_key: Some("sk-direct".to_string()),
            api_key_env: "QUERYDASH_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-direct"));
        assert!(config.validate_for(ProviderKind::OpenAi).is_empty());
    }

    #[test]
    fn test_missing_key_only_matters_for_openai() {
        let config = FileProviderConfig {
            api_key_env: "QUERYDASH_TEST_UNSET_KEY".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate_for(ProviderKind::OpenAi).len(), 1);
        assert!(config.validate_for(ProviderKind::Scripted).is_empty());
    }
}
