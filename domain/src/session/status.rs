//! Session status value object and its transition table.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a [`QuerySession`](super::entities::QuerySession).
///
/// ```text
/// Idle ──> Sending ──> Streaming ──> Completed
///   │         │  │         │
///   │         │  └─────────┼──> Completed   (single-shot response)
///   │         ├──> Failed <┤
///   └─────────┴──> Cancelled <┘
/// ```
///
/// `Completed`, `Failed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Sending,
    Streaming,
    Completed,
    Failed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Sending => "sending",
            SessionStatus::Streaming => "streaming",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    /// No further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Failed | SessionStatus::Cancelled
        )
    }

    /// A request is in flight (`Sending` or `Streaming`).
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Sending | SessionStatus::Streaming)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Idle, Sending)
                | (Idle, Cancelled)
                | (Sending, Streaming)
                | (Sending, Completed)
                | (Sending, Failed)
                | (Sending, Cancelled)
                | (Streaming, Completed)
                | (Streaming, Failed)
                | (Streaming, Cancelled)
        )
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatus::*;

    const ALL: [SessionStatus; 6] = [Idle, Sending, Streaming, Completed, Failed, Cancelled];

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SessionStatus::default(), Idle);
    }

    #[test]
    fn test_happy_path_transitions() {
        assert!(Idle.can_transition_to(Sending));
        assert!(Sending.can_transition_to(Streaming));
        assert!(Streaming.can_transition_to(Completed));
        assert!(Sending.can_transition_to(Completed));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for from in [Completed, Failed, Cancelled] {
            assert!(from.is_terminal());
            for to in ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to} should be rejected");
            }
        }
    }

    #[test]
    fn test_failure_and_cancel_reachable_from_active() {
        for from in [Sending, Streaming] {
            assert!(from.is_active());
            assert!(from.can_transition_to(Failed));
            assert!(from.can_transition_to(Cancelled));
        }
        assert!(!Idle.can_transition_to(Failed));
    }

    #[test]
    fn test_no_backwards_edges() {
        assert!(!Streaming.can_transition_to(Sending));
        assert!(!Sending.can_transition_to(Idle));
        assert!(!Idle.can_transition_to(Streaming));
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&Streaming).unwrap();
        assert_eq!(json, "\"streaming\"");
        let status: SessionStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, Cancelled);
    }
}
