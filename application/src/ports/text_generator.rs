//! Text generator port
//!
//! Defines the interface for communicating with a text-generation service.

use async_trait::async_trait;
use querydash_domain::{Model, ResponseMode, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors that can occur during text generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request was aborted because its cancellation token fired.
    #[error("Request aborted")]
    Aborted,
}

impl GatewayError {
    /// Check if this error is the result of a cancellation rather than a failure
    pub fn is_aborted(&self) -> bool {
        matches!(self, GatewayError::Aborted)
    }
}

/// Whether a generator can take requests right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Ready,
    /// Still initializing; retrying later may succeed.
    Loading,
    /// Initialization failed for the given reason.
    Failed(String),
}

impl Availability {
    pub fn is_ready(&self) -> bool {
        matches!(self, Availability::Ready)
    }

    /// Message shown to the user when a query is refused.
    pub fn unavailable_message(&self) -> Option<String> {
        match self {
            Availability::Ready => None,
            Availability::Loading => {
                Some("Text generation service is not loaded yet. Please wait.".to_string())
            }
            Availability::Failed(reason) => Some(format!(
                "Failed to load text generation service: {}",
                reason
            )),
        }
    }
}

/// A single request to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: Model,
    pub mode: ResponseMode,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, model: Model, mode: ResponseMode) -> Self {
        Self {
            prompt: prompt.into(),
            model,
            mode,
        }
    }
}

/// What the service answered with.
///
/// A streaming request may still be answered with one complete text, so
/// consumers must accept both shapes regardless of the requested mode.
pub enum Generation {
    /// One full response.
    Complete(String),
    /// Incremental fragments.
    Stream(StreamHandle),
}

impl std::fmt::Debug for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generation::Complete(text) => f.debug_tuple("Complete").field(text).finish(),
            Generation::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Handle for receiving streaming events from a generator.
///
/// Wraps the `mpsc::Receiver<StreamEvent>` the generator writes into.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Create a bounded channel whose receiving half is wrapped in a handle.
    pub fn channel(capacity: usize) -> (mpsc::Sender<StreamEvent>, StreamHandle) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, StreamHandle::new(rx))
    }
}

/// Gateway to a text-generation service
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short adapter name for logs and banners.
    fn name(&self) -> &str;

    /// Whether the service is loaded. Requests are refused unless `Ready`.
    fn availability(&self) -> Availability {
        Availability::Ready
    }

    /// Issue a request.
    ///
    /// Implementations should stop producing events and release the
    /// underlying request once `cancel` fires, returning
    /// [`GatewayError::Aborted`] if that happens before a response arrives.
    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> Result<Generation, GatewayError>;
}
