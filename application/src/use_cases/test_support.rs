//! Test doubles shared by the use case tests.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use crate::ports::session_observer::SessionObserver;
use crate::ports::text_generator::{
    Availability, GatewayError, Generation, GenerationRequest, StreamHandle, TextGenerator,
};
use async_trait::async_trait;
use querydash_domain::{SessionId, SessionSnapshot, SessionStatus, StreamEvent};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Generator whose streams are fed by the test. Every request hands the
/// sending half of a fresh stream to the receiver returned by `new`.
pub(crate) struct ManualGenerator {
    availability: Mutex<Availability>,
    streams: mpsc::UnboundedSender<mpsc::Sender<StreamEvent>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ManualGenerator {
    pub fn new() -> (
        Arc<Self>,
        mpsc::UnboundedReceiver<mpsc::Sender<StreamEvent>>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let generator = Arc::new(Self {
            availability: Mutex::new(Availability::Ready),
            streams: tx,
            requests: Mutex::new(Vec::new()),
        });
        (generator, rx)
    }

    pub fn set_availability(&self, availability: Availability) {
        *self.availability.lock().unwrap() = availability;
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ManualGenerator {
    fn name(&self) -> &str {
        "manual"
    }

    fn availability(&self) -> Availability {
        self.availability.lock().unwrap().clone()
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        _cancel: CancellationToken,
    ) -> Result<Generation, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        let (tx, handle) = StreamHandle::channel(16);
        self.streams
            .send(tx)
            .map_err(|_| GatewayError::ConnectionError("stream receiver dropped".into()))?;
        Ok(Generation::Stream(handle))
    }
}

/// Generator that answers every request the same way.
pub(crate) struct FixedGenerator {
    answer: Result<String, GatewayError>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FixedGenerator {
    pub fn text(text: &str) -> Self {
        Self {
            answer: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            answer: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FixedGenerator {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        _cancel: CancellationToken,
    ) -> Result<Generation, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone().map(Generation::Complete)
    }
}

/// Observer that records every callback as a short line.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl SessionObserver for RecordingObserver {
    fn on_session_start(&self, snapshot: &SessionSnapshot) {
        self.push(format!("start {}", snapshot.id));
    }

    fn on_fragment(&self, _id: SessionId, fragment: &str) {
        self.push(format!("fragment {}", fragment));
    }

    fn on_status_change(&self, _id: SessionId, status: SessionStatus) {
        self.push(format!("status {}", status));
    }

    fn on_session_end(&self, snapshot: &SessionSnapshot) {
        self.push(format!("end {}", snapshot.status));
    }
}

#[derive(Default)]
pub(crate) struct RecordingLogger {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingLogger {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl ConversationLogger for RecordingLogger {
    fn log(&self, event: ConversationEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
