use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::llm::summarizer::{LlmError, Summarizer};

/// Client for the Google Generative Language REST API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    const SUMMARIZE_PROMPT: &str = include_str!("./prompts/summarize_0.txt");

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub async fn send_generate_request(
        &self,
        model_name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt.into() }
                    ]
                }
            ]
        });

        let resp = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url,
                model_name.into()
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))
            .map_err(|e| LlmError::Transient(e.to_string()))?;

        let status = resp.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = parse_retry_after(resp.headers());
            tracing::warn!(?retry_after, "Generative service returned 429");
            return Err(LlmError::RateLimited { retry_after });
        }

        if status.is_server_error() {
            let message = resp.text().await.unwrap_or_default();
            return Err(LlmError::Transient(format!("{status}: {message}")));
        }

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(LlmError::Fatal {
                status: status.as_u16(),
                message,
            });
        }

        let response = resp
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| LlmError::Transient(e.to_string()))?;

        response.text().ok_or_else(|| LlmError::Fatal {
            status: 0,
            message: "No content in response".into(),
        })
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// All text parts of the first candidate, joined.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl Summarizer for GeminiClient {
    const SUMMARIZER_MODEL: &'static str = "gemini-pro";

    async fn summarize(&self, content: &str) -> Result<String, LlmError> {
        let prompt = format!("{}\n\n{}", Self::SUMMARIZE_PROMPT.trim_end(), content);

        self.send_generate_request(Self::SUMMARIZER_MODEL, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.send_generate_request(Self::SUMMARIZER_MODEL, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_a_well_formed_response() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [{ "text": "part one " }, { "text": "part two" }],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();

        assert_eq!(response.text().as_deref(), Some("part one part two"));
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn candidate_without_text_parts_yields_no_text() {
        let raw = r#"{"candidates": [{ "content": { "parts": [{}] } }]}"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn parses_integer_retry_after_header() {
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::RETRY_AFTER, "30".parse().unwrap());

        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(30)));
    }

    #[test]
    fn missing_or_unparseable_retry_after_is_none() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::RETRY_AFTER,
            "Wed, 21 Oct 2026 07:28:00 GMT".parse().unwrap(),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }
}
