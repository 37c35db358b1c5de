//! Console output formatter for finished sessions

use colored::Colorize;
use querydash_domain::{SessionSnapshot, SessionStatus};

/// Formats session results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format as JSON
    pub fn format_json(snapshot: &SessionSnapshot) -> String {
        serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    /// Full text of a finished session with a status line, for sessions
    /// whose fragments were not printed as they arrived.
    pub fn format_text(snapshot: &SessionSnapshot) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n\n",
            "Q:".cyan().bold(),
            snapshot.query.content()
        ));
        if snapshot.text.is_empty() {
            output.push_str(&format!("{}\n", "(no response)".dimmed()));
        } else {
            output.push_str(&snapshot.text);
            output.push('\n');
        }
        output.push_str(&Self::status_line(snapshot));
        output.push('\n');

        output
    }

    /// One line describing how the session ended.
    pub fn status_line(snapshot: &SessionSnapshot) -> String {
        match snapshot.status {
            SessionStatus::Completed => format!(
                "{} {} ({} fragments)",
                "v".green(),
                snapshot.status,
                snapshot.fragments
            ),
            SessionStatus::Failed => format!(
                "{} {}: {}",
                "x".red(),
                snapshot.status,
                snapshot.failure.as_deref().unwrap_or("unknown error")
            ),
            SessionStatus::Cancelled => format!("{} {}", "-".yellow(), snapshot.status),
            status => format!("{} {}", "…".dimmed(), status),
        }
    }

    /// Message for a query that could not start.
    pub fn format_error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message.red())
    }
}
