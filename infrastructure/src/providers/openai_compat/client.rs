//! [`TextGenerator`] over an OpenAI-compatible chat completions endpoint.

use super::protocol::{ChatCompletion, ChatCompletionChunk, ChatCompletionRequest, Message};
use super::sse::{SseDecoder, SseFrame};
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use querydash_application::ports::text_generator::{
    Availability, GatewayError, Generation, GenerationRequest, StreamHandle, TextGenerator,
};
use querydash_domain::StreamEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Connection settings for [`OpenAiCompatGenerator`].
#[derive(Debug, Clone)]
pub struct OpenAiCompatConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Where the key was expected; only used in messages.
    pub api_key_env: String,
    /// Fragments buffered between the response reader and the session.
    pub channel_capacity: usize,
}

pub struct OpenAiCompatGenerator {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
    channel_capacity: usize,
}

impl OpenAiCompatGenerator {
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            api_key_env: config.api_key_env,
            channel_capacity: config.channel_capacity.max(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(
        &self,
        request: &GenerationRequest,
        api_key: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let body = ChatCompletionRequest {
            model: request.model.as_str(),
            messages: vec![Message::user(request.prompt.clone())],
            stream: request.mode.is_streaming(),
        };

        debug!(
            "POST {} (model: {}, stream: {})",
            self.endpoint, body.model, body.stream
        );
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = super::protocol::error_message(&text);
        warn!("Text generation request rejected: {} {}", status, message);
        Err(GatewayError::RequestFailed(format!("{}: {}", status, message)))
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatGenerator {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn availability(&self) -> Availability {
        match self.api_key {
            Some(_) => Availability::Ready,
            None => Availability::Failed(format!("no API key (set {})", self.api_key_env)),
        }
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
        cancel: CancellationToken,
    ) -> Result<Generation, GatewayError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GatewayError::ServiceUnavailable(format!(
                "no API key (set {})",
                self.api_key_env
            )));
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GatewayError::Aborted),
            response = self.send(request, api_key) => response?,
        };

        if !request.mode.is_streaming() {
            let completion = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GatewayError::Aborted),
                body = response.json::<ChatCompletion>() => {
                    body.map_err(|e| GatewayError::RequestFailed(e.to_string()))?
                }
            };
            return Ok(Generation::Complete(completion.into_text()));
        }

        let (tx, handle) = StreamHandle::channel(self.channel_capacity);
        tokio::spawn(read_event_stream(response.bytes_stream(), tx, cancel));
        Ok(Generation::Stream(handle))
    }
}

/// Forward the response body as stream events until `[DONE]`, an error,
/// cancellation, or the receiver going away. Returning drops the body,
/// which aborts the request.
async fn read_event_stream<S, B, E>(
    body: S,
    tx: mpsc::Sender<StreamEvent>,
    cancel: CancellationToken,
) where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut body = std::pin::pin!(body);
    let mut decoder = SseDecoder::new();

    loop {
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Response stream cancelled");
                return;
            }
            chunk = body.next() => chunk,
        };

        let body_ended = chunk.is_none();
        let frames = match chunk {
            Some(Ok(bytes)) => decoder.push(bytes.as_ref()),
            Some(Err(e)) => {
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
            None => decoder.finish().into_iter().collect(),
        };

        for frame in frames {
            let data = match frame {
                SseFrame::Done => {
                    let _ = tx.send(StreamEvent::Completed(String::new())).await;
                    return;
                }
                SseFrame::Data(data) => data,
            };
            let fragment = match serde_json::from_str::<ChatCompletionChunk>(&data) {
                Ok(parsed) => match parsed.content() {
                    Some(content) => content.to_string(),
                    None => continue,
                },
                Err(e) => {
                    trace!("Skipping undecodable event: {} ({})", data, e);
                    continue;
                }
            };
            if tx.send(StreamEvent::Delta(fragment)).await.is_err() {
                // session gone
                return;
            }
        }

        if body_ended {
            debug!("Response body ended without [DONE]");
            let _ = tx.send(StreamEvent::Completed(String::new())).await;
            return;
        }
    }
}
