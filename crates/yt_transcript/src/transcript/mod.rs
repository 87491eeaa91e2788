use std::future::Future;
use std::ops::Deref;

pub mod youtube;

use crate::VideoId;

/// Source of timed transcript text for a video.
pub trait TranscriptSource {
    fn fetch_transcript(
        &self,
        video_id: &VideoId,
    ) -> impl Future<Output = Result<Transcript, TranscriptError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("could not extract a video id from the provided input")]
    InvalidUrl,
    #[error("transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),
    #[error("no transcript available for video {0}")]
    NotAvailable(String),
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to parse transcript data: {0}")]
    Parse(&'static str),
}

/// One timed caption line.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Display duration, in seconds
    pub duration: f64,
    pub text: String,
}

/// An ordered sequence of caption segments for one video.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Vec<TranscriptSegment>);

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self(segments)
    }

    /// The full transcript text, segments joined with single spaces.
    pub fn joined_text(&self) -> String {
        self.0
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Deref for Transcript {
    type Target = [TranscriptSegment];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<TranscriptSegment>> for Transcript {
    fn from(segments: Vec<TranscriptSegment>) -> Self {
        Self(segments)
    }
}
