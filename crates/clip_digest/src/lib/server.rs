//! # HTTP Server
//!
//! The thin inbound surface: one summarize route plus a liveness check,
//! with permissive CORS for the decoupled frontend. All real work happens
//! in the pipeline; handlers only translate errors into response shapes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use yt_transcript::{TranscriptSource, VideoId};

use crate::llm::summarizer::Summarizer;
use crate::SummaryPipeline;

pub struct AppState<S, T>
where
    S: Summarizer + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
{
    pub pipeline: Arc<SummaryPipeline<S>>,
    pub transcripts: Arc<T>,
}

impl<S, T> AppState<S, T>
where
    S: Summarizer + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
{
    pub fn new(pipeline: Arc<SummaryPipeline<S>>, transcripts: Arc<T>) -> Self {
        Self {
            pipeline,
            transcripts,
        }
    }
}

impl<S, T> Clone for AppState<S, T>
where
    S: Summarizer + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            transcripts: Arc::clone(&self.transcripts),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(rename = "videoUrl")]
    pub video_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// User-visible request failures. Internal detail is logged at the point
/// of failure, never returned to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Video URL is required")]
    MissingVideoUrl,
    #[error("Could not extract a video id from the provided URL")]
    InvalidVideoUrl,
    #[error("No transcript is available for this video")]
    TranscriptUnavailable,
    #[error("An error occurred during summarization")]
    SummarizationFailed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingVideoUrl | ApiError::InvalidVideoUrl => StatusCode::BAD_REQUEST,
            ApiError::TranscriptUnavailable => StatusCode::NOT_FOUND,
            ApiError::SummarizationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingVideoUrl => "MISSING_VIDEO_URL",
            ApiError::InvalidVideoUrl => "INVALID_VIDEO_URL",
            ApiError::TranscriptUnavailable => "TRANSCRIPT_UNAVAILABLE",
            ApiError::SummarizationFailed => "SUMMARIZATION_FAILED",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": self.error_code(),
        });

        (self.status_code(), Json(body)).into_response()
    }
}

/// `GET /` liveness check.
pub async fn health() -> &'static str {
    "API is running..."
}

/// `POST /api/summarize` fetches the video's transcript and runs the
/// summarization pipeline over it.
pub async fn summarize<S, T>(
    State(state): State<AppState<S, T>>,
    Json(body): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError>
where
    S: Summarizer + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
{
    let video_url = body
        .video_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingVideoUrl)?;

    let video_id = VideoId::parse(video_url).map_err(|_| ApiError::InvalidVideoUrl)?;
    tracing::info!(%video_id, "Summarization requested");

    let transcript = state
        .transcripts
        .fetch_transcript(&video_id)
        .await
        .inspect_err(|e| tracing::error!(error = %e, %video_id, "Failed to fetch transcript"))
        .map_err(|_| ApiError::TranscriptUnavailable)?;

    let summary = state
        .pipeline
        .summarize_text(&transcript.joined_text())
        .await
        .inspect_err(|e| tracing::error!(error = %e, %video_id, "Summarization pipeline failed"))
        .map_err(|_| ApiError::SummarizationFailed)?;

    Ok(Json(SummarizeResponse { summary }))
}

pub fn build_router<S, T>(state: AppState<S, T>) -> Router
where
    S: Summarizer + Send + Sync + 'static,
    T: TranscriptSource + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/api/summarize", post(summarize::<S, T>))
        .with_state(state)
        .layer(cors)
}
