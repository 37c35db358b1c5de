//! Infrastructure layer for querydash
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod seed;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig,
    FileSessionConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{
    OpenAiCompatConfig, OpenAiCompatGenerator, ProviderKind, ScriptedGenerator, build_generator,
};
pub use seed::PlaceholderData;
