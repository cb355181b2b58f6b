//! Text generation clients.
//!
//! The rewrite engine only needs a prompt-in, text-out call; [`TextGenerator`] is that seam.

mod openai;

pub use openai::OpenAIGenerator;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single generation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("empty response from model")]
    EmptyResponse,

    #[error("{0}")]
    Fatal(String),
}

impl GenerationError {
    /// Whether retrying the same prompt may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited(_) | GenerationError::Transport(_)
        )
    }
}

/// Trait for prompt-to-text completion services.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a prompt.
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(GenerationError::RateLimited("slow down".into()).is_transient());
        assert!(GenerationError::Transport("reset".into()).is_transient());
        assert!(!GenerationError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(!GenerationError::EmptyResponse.is_transient());
        assert!(!GenerationError::Fatal("bad key".into()).is_transient());
    }
}
