//! Session parameters: what every query of a consumer is sent with.

use querydash_domain::{Model, ResponseMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request parameters applied to every session a
/// [`StreamQueryUseCase`](crate::use_cases::stream_query::StreamQueryUseCase) launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Model sent with each request.
    pub model: Model,
    /// Streaming or single-shot delivery.
    pub mode: ResponseMode,
    /// Longest wait for the response or for the next stream event. A stream
    /// that keeps delivering never times out. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            model: Model::default(),
            mode: ResponseMode::Streaming,
            timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl SessionParams {
    // ==================== Builder Methods ====================

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_mode(mut self, mode: ResponseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `0` disables the timeout.
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        let timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        self.with_timeout(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SessionParams::default();
        assert_eq!(params.model, Model::DeepseekChat);
        assert_eq!(params.mode, ResponseMode::Streaming);
        assert_eq!(params.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_zero_timeout_disables() {
        let params = SessionParams::default().with_timeout_seconds(0);
        assert_eq!(params.timeout, None);

        let params = SessionParams::default().with_timeout_seconds(5);
        assert_eq!(params.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_builders_chain() {
        let params = SessionParams::default()
            .with_model(Model::Gpt4oMini)
            .with_mode(ResponseMode::SingleShot);
        assert_eq!(params.model, Model::Gpt4oMini);
        assert!(!params.mode.is_streaming());
    }
}
