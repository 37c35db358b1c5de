//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod provider;
mod session;

pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;
pub use session::FileSessionConfig;

use querydash_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text generation backend
    pub provider: FileProviderConfig,
    /// Request parameters
    pub session: FileSessionConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks, in order: the provider kind, the API key for that kind, and
    /// the `[session]` values.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let (kind, kind_issues) = self.provider.parse_kind();
        issues.extend(kind_issues);
        issues.extend(self.provider.validate_for(kind));

        issues.extend(self.session.to_session_params().1);

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;
    use querydash_domain::{Model, OutputFormat, ResponseMode};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[provider]
kind = "scripted"
scripted_reply = "Hello from the script"
scripted_delay_ms = 5

[session]
model = "deepseek-reasoner"
mode = "single-shot"
timeout_seconds = 60
channel_capacity = 4

[output]
format = "json"
color = false

[logging]
conversation_log = "/tmp/querydash.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.parse_kind().0, ProviderKind::Scripted);
        assert_eq!(
            config.provider.scripted_reply.as_deref(),
            Some("Hello from the script")
        );
        let (params, issues) = config.session.to_session_params();
        assert_eq!(params.model, Model::DeepseekReasoner);
        assert_eq!(params.mode, ResponseMode::SingleShot);
        assert!(issues.is_empty());
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(config.logging.conversation_log.is_some());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[session]
model = "gpt-4.1-nano"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.parse_model().0, Some(Model::Gpt41Nano));
        // Defaults should apply
        assert_eq!(config.provider.base_url, "https://api.deepseek.com");
        assert_eq!(config.session.timeout_seconds, 120);
        assert!(config.output.color);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[provider]
kind = "carrier-pigeon"
api_key = "sk-test"

[session]
model = ""
channel_capacity = 0
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 1);
    }
}
