//! Streaming events delivered by a text-generation transport.
//!
//! [`StreamEvent`] bridges infrastructure-level streaming (e.g. SSE chunks
//! from an HTTP endpoint) to the application layer, one event per fragment.

/// An event in a streaming response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental text fragment.
    Delta(String),
    /// Normal end of stream. Carries the full text when the transport has it
    /// (empty otherwise).
    Completed(String),
    /// The transport failed mid-stream.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Delta or Completed event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) | StreamEvent::Completed(s) => Some(s),
            StreamEvent::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}
