//! Offline [`TextGenerator`] that plays back a fixed reply.
//!
//! Used for demos and for running the CLI without network access. The reply
//! is split into word fragments sent with a fixed delay between them.

use async_trait::async_trait;
use querydash_application::ports::text_generator::{
    Availability, GatewayError, Generation, GenerationRequest, StreamHandle, TextGenerator,
};
use querydash_domain::StreamEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub struct ScriptedGenerator {
    /// `None` echoes the prompt.
    reply: Option<String>,
    delay: Duration,
    availability: Availability,
    channel_capacity: usize,
}

impl ScriptedGenerator {
    pub fn new(reply: Option<String>, delay: Duration) -> Self {
        Self {
            reply,
            delay,
            availability: Availability::Ready,
            channel_capacity: 32,
        }
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    fn reply_for(&self, prompt: &str) -> String {
        self.reply.clone().unwrap_or_else(|| prompt.to_string())
    }
}

/// Split after each space so the fragments concatenate back to `text`.
fn word_fragments(text: &str) -> Vec<String> {
    text.split_inclusive(' ').map(str::to_string).collect()
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn availability(&self) -> Availability {
        self.availability.clone()
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> Result<Generation, GatewayError> {
        if let Some(message) = self.availability.unavailable_message() {
            return Err(GatewayError::ServiceUnavailable(message));
        }
        let reply = self.reply_for(&request.prompt);

        if !request.mode.is_streaming() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GatewayError::Aborted),
                _ = tokio::time::sleep(self.delay) => {}
            }
            return Ok(Generation::Complete(reply));
        }

        let (tx, handle) = StreamHandle::channel(self.channel_capacity);
        tokio::spawn(play(word_fragments(&reply), self.delay, tx, cancel));
        Ok(Generation::Stream(handle))
    }
}

async fn play(
    fragments: Vec<String>,
    delay: Duration,
    tx: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
) {
    for fragment in fragments {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Scripted playback cancelled");
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }
        if tx.send(StreamEvent::Delta(fragment)).await.is_err() {
            return;
        }
    }
    let _ = tx.send(StreamEvent::Completed(String::new())).await;
}
