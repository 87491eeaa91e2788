use std::sync::{Arc, Mutex};

use yt_transcript::{Transcript, TranscriptError, TranscriptSegment, TranscriptSource, VideoId};

/// Stand-in transcript source serving one fixed transcript.
#[derive(Clone)]
pub struct MockTranscriptSource {
    pub requested: Arc<Mutex<Vec<String>>>,
    text: Option<String>,
}

impl MockTranscriptSource {
    pub fn new(text: &str) -> Self {
        Self {
            requested: Arc::new(Mutex::new(Vec::new())),
            text: Some(text.to_string()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            requested: Arc::new(Mutex::new(Vec::new())),
            text: None,
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    async fn fetch_transcript(&self, video_id: &VideoId) -> Result<Transcript, TranscriptError> {
        self.requested
            .lock()
            .unwrap()
            .push(video_id.as_str().to_string());

        match &self.text {
            Some(text) => Ok(Transcript::new(vec![TranscriptSegment {
                start: 0.0,
                duration: 1.0,
                text: text.clone(),
            }])),
            None => Err(TranscriptError::NotAvailable(video_id.to_string())),
        }
    }
}
