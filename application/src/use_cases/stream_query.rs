//! Stream Query use case
//!
//! Drives one [`QuerySession`] against a [`TextGenerator`]: sends the
//! request, appends fragments as they arrive and settles the session in
//! exactly one terminal status. Cancellation is observable immediately
//! through the [`SessionHandle`] and aborts the upstream request.

use crate::config::SessionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::session_observer::{NoObserver, SessionObserver};
use crate::ports::text_generator::{
    GatewayError, Generation, GenerationRequest, StreamHandle, TextGenerator,
};
use querydash_domain::{
    FragmentOutcome, Model, Query, QuerySession, SessionId, SessionSnapshot, SessionStatus,
    StreamEvent,
};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

/// Shown instead of transport details when a request fails.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to load AI response. See logs for details.";

/// Errors that can occur while running a query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The generator refused the request. Nothing was started.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Query cancelled")]
    Cancelled,
}

impl QueryError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, QueryError::Cancelled)
    }

    /// Message fit for the end user. Cancellation is not an error to them.
    pub fn user_message(&self) -> Option<String> {
        match self {
            QueryError::ServiceUnavailable(message) => Some(message.clone()),
            QueryError::RequestFailed(_) => Some(REQUEST_FAILED_MESSAGE.to_string()),
            QueryError::Cancelled => None,
        }
    }
}

impl From<GatewayError> for QueryError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Aborted => QueryError::Cancelled,
            GatewayError::ServiceUnavailable(message) => QueryError::ServiceUnavailable(message),
            other => QueryError::RequestFailed(other.to_string()),
        }
    }
}

/// State shared between the driver task and the handle.
struct SessionShared {
    session: Mutex<QuerySession>,
    updates: watch::Sender<SessionSnapshot>,
    observer: Arc<dyn SessionObserver>,
    conversation_logger: Arc<dyn ConversationLogger>,
    model: Model,
}

impl SessionShared {
    fn lock(&self) -> MutexGuard<'_, QuerySession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fragments(&self) -> usize {
        self.lock().fragments()
    }

    fn apply_fragment(&self, fragment: &str) -> FragmentOutcome {
        let mut session = self.lock();
        let before = session.status();
        let outcome = session.apply_fragment(fragment);
        if outcome != FragmentOutcome::Applied {
            return outcome;
        }

        let snapshot = session.snapshot();
        if before != snapshot.status {
            self.observer.on_status_change(snapshot.id, snapshot.status);
        }
        self.observer.on_fragment(snapshot.id, fragment);
        drop(session);

        self.updates.send_replace(snapshot);
        outcome
    }

    /// Apply a terminal transition. Observers, the conversation log and
    /// watchers hear about it only if the transition was accepted.
    fn finish(&self, transition: impl FnOnce(&mut QuerySession) -> bool) -> bool {
        let mut session = self.lock();
        let (fragments_before, len_before) =
            (session.fragments(), session.accumulated_text().len());
        if !transition(&mut session) {
            return false;
        }

        let snapshot = session.snapshot();
        if snapshot.fragments > fragments_before {
            // body delivered with the completion itself
            self.observer.on_fragment(snapshot.id, &snapshot.text[len_before..]);
        }
        self.observer.on_status_change(snapshot.id, snapshot.status);
        self.observer.on_session_end(&snapshot);
        drop(session);

        self.log_end(&snapshot);
        self.updates.send_replace(snapshot);
        true
    }

    fn complete(&self, body: Option<&str>) -> bool {
        self.finish(|session| match body {
            Some(text) => session.complete_with(text),
            None => session.complete(),
        })
    }

    fn fail(&self, err: &QueryError) -> bool {
        let message = err.user_message().unwrap_or_else(|| err.to_string());
        self.finish(|session| session.fail(message))
    }

    fn cancel(&self) -> bool {
        self.finish(|session| session.cancel())
    }

    fn log_end(&self, snapshot: &SessionSnapshot) {
        let event_type = match snapshot.status {
            SessionStatus::Completed => "query_completed",
            SessionStatus::Failed => "query_failed",
            SessionStatus::Cancelled => "query_cancelled",
            _ => return,
        };
        self.conversation_logger.log(ConversationEvent::new(
            event_type,
            serde_json::json!({
                "session": snapshot.id.value(),
                "model": self.model.to_string(),
                "text": snapshot.text,
                "fragments": snapshot.fragments,
                "failure": snapshot.failure,
            }),
        ));
    }
}

/// Use case for running a single query against a text generator
#[derive(Clone)]
pub struct StreamQueryUseCase {
    generator: Arc<dyn TextGenerator>,
    observer: Arc<dyn SessionObserver>,
    conversation_logger: Arc<dyn ConversationLogger>,
    params: SessionParams,
}

impl StreamQueryUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            observer: Arc::new(NoObserver),
            conversation_logger: Arc::new(NoConversationLogger),
            params: SessionParams::default(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    /// Replace the parameters used by sessions launched from now on.
    pub fn set_params(&mut self, params: SessionParams) {
        self.params = params;
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Refuse early when the generator cannot take requests.
    pub fn check_available(&self) -> Result<(), QueryError> {
        match self.generator.availability().unavailable_message() {
            None => Ok(()),
            Some(message) => {
                warn!("{} is not available: {}", self.generator.name(), message);
                Err(QueryError::ServiceUnavailable(message))
            }
        }
    }

    /// Start a session and return its handle. The request runs on a
    /// spawned task that stops when `token` is cancelled.
    pub fn launch(
        &self,
        id: SessionId,
        query: Query,
        token: CancellationToken,
    ) -> Result<SessionHandle, QueryError> {
        self.check_available()?;

        let mut session = QuerySession::new(id, query);
        session
            .begin()
            .map_err(|e| QueryError::RequestFailed(e.to_string()))?;
        let snapshot = session.snapshot();

        info!(
            "Session {} started ({}, {}): {}",
            id,
            self.params.model,
            self.params.mode,
            snapshot.query.preview(80)
        );
        self.observer.on_session_start(&snapshot);
        self.observer.on_status_change(id, SessionStatus::Sending);
        self.conversation_logger.log(ConversationEvent::new(
            "query_started",
            serde_json::json!({
                "session": id.value(),
                "model": self.params.model.to_string(),
                "mode": self.params.mode.as_str(),
                "query": snapshot.query.content(),
            }),
        ));

        let request = GenerationRequest::new(
            snapshot.query.content(),
            self.params.model.clone(),
            self.params.mode,
        );
        let (updates, receiver) = watch::channel(snapshot);
        let shared = Arc::new(SessionShared {
            session: Mutex::new(session),
            updates,
            observer: Arc::clone(&self.observer),
            conversation_logger: Arc::clone(&self.conversation_logger),
            model: self.params.model.clone(),
        });

        let task = tokio::spawn(drive(
            Arc::clone(&shared),
            Arc::clone(&self.generator),
            request,
            token.clone(),
            self.params.timeout,
        ));

        Ok(SessionHandle {
            id,
            shared,
            token,
            updates: receiver,
            task,
        })
    }
}

/// Body of the spawned task: run the exchange, then settle the session.
async fn drive(
    shared: Arc<SessionShared>,
    generator: Arc<dyn TextGenerator>,
    request: GenerationRequest,
    token: CancellationToken,
    timeout: Option<Duration>,
) {
    // The upstream request never outlives this task.
    let _abort_upstream = token.clone().drop_guard();
    let id = shared.lock().id();

    let result = exchange(&shared, generator.as_ref(), &request, &token, timeout).await;

    // Cancellation is checked before any other terminal transition.
    if token.is_cancelled() {
        if shared.cancel() {
            debug!("Session {} cancelled", id);
        }
        return;
    }

    match result {
        Ok(body) => {
            if shared.complete(body.as_deref()) {
                info!("Session {} completed", id);
            }
        }
        Err(QueryError::Cancelled) => {
            if shared.cancel() {
                debug!("Session {} aborted by {}", id, generator.name());
            }
        }
        Err(err) => {
            error!("Session {} failed: {}", id, err);
            shared.fail(&err);
        }
    }
}

/// Issue the request and consume the answer. A returned body is the full
/// answer delivered at once, to be applied together with the completion.
///
/// `idle` bounds the wait for the response and for each stream event, so a
/// slow but live stream never times out.
async fn exchange(
    shared: &SessionShared,
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
    token: &CancellationToken,
    idle: Option<Duration>,
) -> Result<Option<String>, QueryError> {
    let generation = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(QueryError::Cancelled),
        result = within(idle, generator.generate(request, token.clone())) => result??,
    };

    match generation {
        Generation::Complete(text) => Ok(Some(text)),
        Generation::Stream(handle) => pump(shared, handle, token, idle).await,
    }
}

async fn pump(
    shared: &SessionShared,
    mut handle: StreamHandle,
    token: &CancellationToken,
    idle: Option<Duration>,
) -> Result<Option<String>, QueryError> {
    loop {
        let event = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(QueryError::Cancelled),
            event = within(idle, handle.receiver.recv()) => event?,
        };

        match event {
            Some(StreamEvent::Delta(fragment)) => {
                if token.is_cancelled() {
                    return Err(QueryError::Cancelled);
                }
                if shared.apply_fragment(&fragment) == FragmentOutcome::Discarded {
                    trace!("Discarded late fragment ({} bytes)", fragment.len());
                }
            }
            Some(StreamEvent::Completed(full)) => {
                // Some services only report the whole text at the end.
                if shared.fragments() == 0 && !full.is_empty() {
                    return Ok(Some(full));
                }
                return Ok(None);
            }
            Some(StreamEvent::Error(message)) => {
                return Err(QueryError::RequestFailed(message));
            }
            // closed without an explicit end marker
            None => return Ok(None),
        }
    }
}

/// Await `future`, failing once `limit` passes without it resolving.
async fn within<T>(
    limit: Option<Duration>,
    future: impl Future<Output = T>,
) -> Result<T, QueryError> {
    let Some(limit) = limit else {
        return Ok(future.await);
    };
    tokio::time::timeout(limit, future).await.map_err(|_| {
        QueryError::RequestFailed(format!("no response for {}s", limit.as_secs_f64()))
    })
}

/// Handle to a running (or finished) session.
pub struct SessionHandle {
    id: SessionId,
    shared: Arc<SessionShared>,
    token: CancellationToken,
    updates: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.shared.lock().status()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock().snapshot()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// Cancel the session. The status is `cancelled` by the time this
    /// returns; the upstream request is aborted in the background.
    ///
    /// Returns `false` if the session had already finished.
    pub fn cancel(&self) -> bool {
        let cancelled = self.shared.cancel();
        self.token.cancel();
        if cancelled {
            debug!("Session {} cancelled", self.id);
        }
        cancelled
    }

    pub fn watch(&self) -> SessionWatch {
        SessionWatch {
            id: self.id,
            receiver: self.updates.clone(),
        }
    }

    /// Wait for the session to reach a terminal status.
    pub async fn wait(&self) -> SessionSnapshot {
        self.watch().finished().await
    }

    /// Wait for the session and its driver task to finish.
    pub async fn join(self) -> SessionSnapshot {
        let snapshot = self.wait().await;
        if let Err(e) = self.task.await {
            warn!("Session {} driver ended abnormally: {}", self.id, e);
        }
        snapshot
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("status", &self.status())
            .finish()
    }
}

/// Read-only view of a session that outlives its handle.
#[derive(Clone, Debug)]
pub struct SessionWatch {
    id: SessionId,
    receiver: watch::Receiver<SessionSnapshot>,
}

impl SessionWatch {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn current(&self) -> SessionSnapshot {
        self.receiver.borrow().clone()
    }

    /// Wait until a snapshot satisfies `predicate` and return it. If the
    /// driver is gone the latest snapshot is returned as is.
    pub async fn wait_until(
        &mut self,
        predicate: impl FnMut(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        let result = self.receiver.wait_for(predicate).await.map(|s| s.clone());
        match result {
            Ok(snapshot) => snapshot,
            Err(_) => self.current(),
        }
    }

    /// Wait for the terminal snapshot.
    pub async fn finished(mut self) -> SessionSnapshot {
        self.wait_until(|s| s.status.is_terminal()).await
    }
}
