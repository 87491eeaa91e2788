use std::future::Future;
use std::time::Duration;

/// Classification of a failed generative-service call.
///
/// The distinction is load-bearing for the retry coordinator: rate limits
/// and transient faults are recoverable, fatal rejections are not.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("rate limited by the generative service")]
    RateLimited { retry_after: Option<Duration> },
    #[error("transient service error: {0}")]
    Transient(String),
    #[error("API error: {status} - {message}")]
    Fatal { status: u16, message: String },
}

impl LlmError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LlmError::Fatal { .. })
    }
}

pub trait Summarizer {
    const SUMMARIZER_MODEL: &str;

    /// Summarizes one piece of transcript text.
    fn summarize(&self, content: &str) -> impl Future<Output = Result<String, LlmError>> + Send;

    /// Sends a fully prepared prompt; used by the combine pass.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;
}
