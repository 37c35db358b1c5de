//! Structured configuration issues.
//!
//! Loaders report problems as [`ConfigIssue`] values instead of failing, so
//! the binary can print warnings and carry on with defaults.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A model field was set to an empty string.
    EmptyModelName { field: String },
    /// A string field did not match any known value.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A numeric field that must be positive was zero.
    ZeroValue { field: String },
    /// No API key could be resolved for the selected provider.
    MissingApiKey { env: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let w = ConfigIssue::warning(
            ConfigIssueCode::ZeroValue {
                field: "session.channel_capacity".to_string(),
            },
            "zero",
        );
        assert_eq!(w.severity, Severity::Warning);
        assert!(!w.is_error());

        let e = ConfigIssue::error(
            ConfigIssueCode::MissingApiKey {
                env: "OPENAI_API_KEY".to_string(),
            },
            "missing",
        );
        assert!(e.is_error());
    }
}
