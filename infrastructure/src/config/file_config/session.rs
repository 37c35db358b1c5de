//! Session configuration from TOML (`[session]` section)

use querydash_application::SessionParams;
use querydash_domain::{ConfigIssue, ConfigIssueCode, Model, ResponseMode};
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [session]
/// model = "deepseek-chat"
/// mode = "streaming"          # or "single-shot"
/// timeout_seconds = 120       # idle limit between events; 0 disables it
/// channel_capacity = 32
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    pub model: Option<String>,
    pub mode: Option<String>,
    pub timeout_seconds: u64,
    /// Fragments buffered between the transport and the session.
    pub channel_capacity: usize,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            model: None,
            mode: None,
            timeout_seconds: 120,
            channel_capacity: 32,
        }
    }
}

impl FileSessionConfig {
    pub fn parse_model(&self) -> (Option<Model>, Vec<ConfigIssue>) {
        match &self.model {
            None => (None, Vec::new()),
            Some(s) if s.trim().is_empty() => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        field: "session.model".to_string(),
                    },
                    "session.model: model name cannot be empty",
                )],
            ),
            Some(s) => (Some(Model::from_name(s.trim())), Vec::new()),
        }
    }

    pub fn parse_mode(&self) -> (Option<ResponseMode>, Vec<ConfigIssue>) {
        let Some(value) = &self.mode else {
            return (None, Vec::new());
        };
        match value.parse::<ResponseMode>() {
            Ok(mode) => (Some(mode), Vec::new()),
            Err(_) => (
                None,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "session.mode".to_string(),
                        value: value.clone(),
                        valid_values: vec!["streaming".to_string(), "single-shot".to_string()],
                    },
                    format!(
                        "session.mode: unknown value '{}', falling back to 'streaming'",
                        value
                    ),
                )],
            ),
        }
    }

    /// Buffer size handed to transports; never zero.
    pub fn effective_channel_capacity(&self) -> usize {
        self.channel_capacity.max(1)
    }

    /// Session parameters described by this section. Invalid values fall
    /// back to defaults; the issues explain which.
    pub fn to_session_params(&self) -> (SessionParams, Vec<ConfigIssue>) {
        let (model, mut issues) = self.parse_model();
        let (mode, mode_issues) = self.parse_mode();
        issues.extend(mode_issues);

        if self.channel_capacity == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroValue {
                    field: "session.channel_capacity".to_string(),
                },
                "session.channel_capacity: must be at least 1, using 1",
            ));
        }

        let mut params = SessionParams::default().with_timeout_seconds(self.timeout_seconds);
        if let Some(model) = model {
            params = params.with_model(model);
        }
        if let Some(mode) = mode {
            params = params.with_mode(mode);
        }
        (params, issues)
    }
}
