//! OpenAI-compatible chat completions adapter (DeepSeek, OpenAI, local
//! servers exposing the same API).

pub mod client;
pub mod protocol;
pub mod sse;

pub use client::{OpenAiCompatConfig, OpenAiCompatGenerator};
