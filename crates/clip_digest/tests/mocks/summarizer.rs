use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clip_digest::{LlmError, Summarizer};

/// Stand-in for the Gemini client.
///
/// Records every call. By default `summarize` answers with a summary derived
/// from the first word of its input and `generate` echoes the whole prompt
/// back, so ordering is assertable on the final output. Scripted responses,
/// when present, are consumed first, one per call.
#[derive(Clone, Default)]
pub struct MockSummarizer {
    pub summarize_calls: Arc<Mutex<Vec<String>>>,
    pub generate_calls: Arc<Mutex<Vec<String>>>,
    script: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    delay: Option<(String, Duration)>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers the next calls from `responses` in order, then falls back to
    /// the default echoing behavior.
    pub fn scripted(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(responses.into())),
            ..Default::default()
        }
    }

    /// Sleeps before answering any call whose input starts with `prefix`.
    pub fn with_delay(mut self, prefix: &str, delay: Duration) -> Self {
        self.delay = Some((prefix.to_string(), delay));
        self
    }

    pub fn total_calls(&self) -> usize {
        self.summarize_calls.lock().unwrap().len() + self.generate_calls.lock().unwrap().len()
    }

    async fn respond(&self, input: &str, fallback: String) -> Result<String, LlmError> {
        if let Some((prefix, delay)) = &self.delay {
            if input.starts_with(prefix.as_str()) {
                tokio::time::sleep(*delay).await;
            }
        }

        if let Some(scripted) = self.script.lock().unwrap().pop_front() {
            return scripted;
        }

        Ok(fallback)
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-gemini";

    async fn summarize(&self, content: &str) -> Result<String, LlmError> {
        self.summarize_calls.lock().unwrap().push(content.to_string());

        let first_word = content.split_whitespace().next().unwrap_or("").to_string();
        self.respond(content, format!("summary:{first_word}")).await
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate_calls.lock().unwrap().push(prompt.to_string());
        self.respond(prompt, prompt.to_string()).await
    }
}
