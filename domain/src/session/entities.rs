//! Query session entity

use super::status::SessionStatus;
use crate::core::error::DomainError;
use crate::core::query::Query;
use serde::{Deserialize, Serialize};

/// Identifier of a session, unique per consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a fragment handed to [`QuerySession::apply_fragment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// Appended to the accumulated text.
    Applied,
    /// Empty fragment, nothing to append.
    Skipped,
    /// The session is not accepting fragments (not started, or terminal).
    Discarded,
}

/// One request/response exchange with a text-generation service (Entity)
///
/// The entity only records state; driving the request is the application
/// layer's job. Every mutator checks the current [`SessionStatus`] first, so a
/// cancelled session ignores anything that arrives afterwards.
#[derive(Debug, Clone)]
pub struct QuerySession {
    id: SessionId,
    query: Query,
    status: SessionStatus,
    text: String,
    fragments: usize,
    failure: Option<String>,
}

impl QuerySession {
    pub fn new(id: SessionId, query: impl Into<Query>) -> Self {
        Self {
            id,
            query: query.into(),
            status: SessionStatus::Idle,
            text: String::new(),
            fragments: 0,
            failure: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Concatenation of every applied fragment, in arrival order.
    pub fn accumulated_text(&self) -> &str {
        &self.text
    }

    /// Number of fragments applied so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// User-visible failure message, set once the session has failed.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// `Idle -> Sending`. Called once, when the request is issued.
    pub fn begin(&mut self) -> Result<(), DomainError> {
        self.transition(SessionStatus::Sending)
    }

    /// Append a fragment. The first applied fragment moves `Sending -> Streaming`.
    pub fn apply_fragment(&mut self, fragment: &str) -> FragmentOutcome {
        if !self.status.is_active() {
            return FragmentOutcome::Discarded;
        }
        if fragment.is_empty() {
            return FragmentOutcome::Skipped;
        }
        if self.status == SessionStatus::Sending {
            self.status = SessionStatus::Streaming;
        }
        self.text.push_str(fragment);
        self.fragments += 1;
        FragmentOutcome::Applied
    }

    /// Normal end of the exchange. Returns `false` if the session was not
    /// active (e.g. already cancelled), in which case nothing changes.
    pub fn complete(&mut self) -> bool {
        self.transition(SessionStatus::Completed).is_ok()
    }

    /// Normal end carrying the whole answer at once (single-shot response,
    /// or a stream that only reported its full text at the end). From
    /// `Sending` this goes straight to `Completed`.
    pub fn complete_with(&mut self, text: &str) -> bool {
        if !self.status.can_transition_to(SessionStatus::Completed) {
            return false;
        }
        if !text.is_empty() {
            self.text.push_str(text);
            self.fragments += 1;
        }
        self.status = SessionStatus::Completed;
        true
    }

    /// The exchange failed. Accumulated text is kept as is.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if self.transition(SessionStatus::Failed).is_err() {
            return false;
        }
        self.failure = Some(message.into());
        true
    }

    /// Cancel from any non-terminal status. Idempotent: returns `false` when
    /// the session had already finished.
    pub fn cancel(&mut self) -> bool {
        self.transition(SessionStatus::Cancelled).is_ok()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            query: self.query.clone(),
            status: self.status,
            text: self.text.clone(),
            fragments: self.fragments,
            failure: self.failure.clone(),
        }
    }

    fn transition(&mut self, next: SessionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Point-in-time copy of a [`QuerySession`], handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub query: Query,
    pub status: SessionStatus,
    pub text: String,
    pub fragments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(query: &str) -> QuerySession {
        let mut session = QuerySession::new(SessionId::new(1), query);
        session.begin().unwrap();
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = QuerySession::new(SessionId::new(7), "Hello?");
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.accumulated_text(), "");
        assert_eq!(session.id().value(), 7);
        assert_eq!(session.query().content(), "Hello?");
    }

    #[test]
    fn test_fragments_concatenate_then_complete() {
        let mut session = started("Hello?");
        assert_eq!(session.status(), SessionStatus::Sending);

        for fragment in ["Hel", "lo ", "world"] {
            assert_eq!(session.apply_fragment(fragment), FragmentOutcome::Applied);
            assert_eq!(session.status(), SessionStatus::Streaming);
        }
        assert!(session.complete());

        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.accumulated_text(), "Hello world");
        assert_eq!(session.fragments(), 3);
    }

    #[test]
    fn test_late_fragment_after_cancel_is_discarded() {
        let mut session = started("X");
        session.apply_fragment("partial");
        assert!(session.cancel());

        assert_eq!(session.apply_fragment("ignored"), FragmentOutcome::Discarded);
        assert!(!session.complete());
        assert_eq!(session.status(), SessionStatus::Cancelled);
        assert_eq!(session.accumulated_text(), "partial");
    }

    #[test]
    fn test_cancel_twice_is_noop() {
        let mut session = started("X");
        assert!(session.cancel());
        assert!(!session.cancel());
        assert_eq!(session.status(), SessionStatus::Cancelled);
    }

    #[test]
    fn test_cancel_idle_session() {
        let mut session = QuerySession::new(SessionId::new(1), "never sent");
        assert!(session.cancel());
        assert_eq!(session.status(), SessionStatus::Cancelled);
    }

    #[test]
    fn test_failure_keeps_text() {
        let mut session = started("Y");
        session.apply_fragment("one ");
        session.apply_fragment("two");
        assert!(session.fail("Failed to load AI response."));

        assert_eq!(session.status(), SessionStatus::Failed);
        assert_eq!(session.accumulated_text(), "one two");
        assert_eq!(session.failure(), Some("Failed to load AI response."));
        assert!(!session.cancel());
    }

    #[test]
    fn test_single_shot_completes_from_sending() {
        let mut session = started("Z");
        assert!(session.complete());
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.accumulated_text(), "");
    }

    #[test]
    fn test_complete_with_full_text_from_sending() {
        let mut session = started("Z");
        assert!(session.complete_with("whole answer"));
        assert_eq!(session.status(), SessionStatus::Completed);
        assert_eq!(session.accumulated_text(), "whole answer");
        assert_eq!(session.fragments(), 1);
    }

    #[test]
    fn test_complete_with_after_cancel_is_ignored() {
        let mut session = started("Z");
        session.cancel();
        assert!(!session.complete_with("too late"));
        assert_eq!(session.accumulated_text(), "");
    }

    #[test]
    fn test_empty_fragment_skipped_without_transition() {
        let mut session = started("Z");
        assert_eq!(session.apply_fragment(""), FragmentOutcome::Skipped);
        assert_eq!(session.status(), SessionStatus::Sending);
        assert_eq!(session.fragments(), 0);
    }

    #[test]
    fn test_fragment_before_begin_is_discarded() {
        let mut session = QuerySession::new(SessionId::new(1), "Z");
        assert_eq!(session.apply_fragment("early"), FragmentOutcome::Discarded);
        assert_eq!(session.accumulated_text(), "");
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let mut session = started("Z");
        let err = session.begin().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: SessionStatus::Sending,
                to: SessionStatus::Sending,
            }
        );
    }

    #[test]
    fn test_fail_from_idle_is_rejected() {
        let mut session = QuerySession::new(SessionId::new(1), "Z");
        assert!(!session.fail("boom"));
        assert_eq!(session.failure(), None);
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn test_snapshot_serializes_without_empty_failure() {
        let mut session = started("Hi");
        session.apply_fragment("Hey");
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["query"], "Hi");
        assert_eq!(json["status"], "streaming");
        assert_eq!(json["text"], "Hey");
        assert!(json.get("failure").is_none());
    }

    #[test]
    fn test_session_id_sequence() {
        let id = SessionId::new(1);
        assert_eq!(id.next().value(), 2);
        assert_eq!(id.to_string(), "#1");
    }
}
