//! Query controller
//!
//! Owns at most one active session for a consuming view. Starting a new
//! query supersedes the active one; dropping the controller tears the
//! active session down.

use super::stream_query::{QueryError, SessionHandle, SessionWatch, StreamQueryUseCase};
use crate::config::SessionParams;
use querydash_domain::{Query, SessionId, SessionSnapshot, SessionStatus};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct QueryController {
    use_case: StreamQueryUseCase,
    active: Option<SessionHandle>,
    next_id: SessionId,
    /// Parent of every session token. Cancelling it stops the active
    /// session and any started afterwards.
    cancellation_token: Option<CancellationToken>,
}

impl QueryController {
    pub fn new(use_case: StreamQueryUseCase) -> Self {
        Self {
            use_case,
            active: None,
            next_id: SessionId::new(1),
            cancellation_token: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn params(&self) -> &SessionParams {
        self.use_case.params()
    }

    /// Parameters for queries started from now on. The active session keeps
    /// the ones it was started with.
    pub fn set_params(&mut self, params: SessionParams) {
        self.use_case.set_params(params);
    }

    pub fn generator_name(&self) -> &str {
        self.use_case.generator_name()
    }

    /// Start a query, cancelling the active session first.
    ///
    /// If the generator is unavailable nothing changes: the active session,
    /// if any, keeps running.
    pub fn start(&mut self, query: impl Into<Query>) -> Result<SessionWatch, QueryError> {
        self.use_case.check_available()?;

        if let Some(previous) = self.active.take()
            && previous.cancel()
        {
            debug!("Session {} superseded", previous.id());
        }

        let token = match &self.cancellation_token {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let id = self.next_id;
        self.next_id = id.next();

        let handle = self.use_case.launch(id, query.into(), token)?;
        let watch = handle.watch();
        self.active = Some(handle);
        Ok(watch)
    }

    /// Cancel the active session. Returns `false` if there was nothing
    /// left to cancel.
    pub fn cancel(&mut self) -> bool {
        self.active.as_ref().is_some_and(|handle| handle.cancel())
    }

    pub fn active(&self) -> Option<&SessionHandle> {
        self.active.as_ref()
    }

    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.active.as_ref().map(SessionHandle::snapshot)
    }

    /// Status of the most recent session; `Idle` before the first one.
    pub fn status(&self) -> SessionStatus {
        self.active
            .as_ref()
            .map_or(SessionStatus::Idle, SessionHandle::status)
    }

    pub fn is_busy(&self) -> bool {
        self.status().is_active()
    }

    /// Cancel the active session and wait for its driver to stop.
    pub async fn shutdown(&mut self) -> Option<SessionSnapshot> {
        let handle = self.active.take()?;
        handle.cancel();
        Some(handle.join().await)
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }
}
