//! Session observer port
//!
//! Defines how a consuming view is told about a session's progress.

use querydash_domain::{SessionId, SessionSnapshot, SessionStatus};

/// Callbacks for session progress.
///
/// Implementations live in the presentation layer and can display progress
/// in various ways (streamed console text, JSON, a UI). Callbacks run while
/// the session's state is locked, so they must not block and must not call
/// back into the session's handle.
pub trait SessionObserver: Send + Sync {
    /// A session was created and its request is being sent.
    fn on_session_start(&self, _snapshot: &SessionSnapshot) {}

    /// A fragment was appended to the session's text.
    fn on_fragment(&self, _id: SessionId, _fragment: &str) {}

    /// The session moved to a new status.
    fn on_status_change(&self, _id: SessionId, _status: SessionStatus) {}

    /// The session reached a terminal status. `snapshot.failure` carries the
    /// user-visible message for failed sessions.
    fn on_session_end(&self, _snapshot: &SessionSnapshot) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoObserver;

impl SessionObserver for NoObserver {}
