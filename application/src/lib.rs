//! Application layer for querydash
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    session_observer::{NoObserver, SessionObserver},
    text_generator::{
        Availability, GatewayError, Generation, GenerationRequest, StreamHandle, TextGenerator,
    },
};
pub use use_cases::query_controller::QueryController;
pub use use_cases::stream_query::{QueryError, SessionHandle, SessionWatch, StreamQueryUseCase};
