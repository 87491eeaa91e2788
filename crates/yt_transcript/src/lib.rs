//! # Transcript Module
//!
//! This module provides functionality for fetching YouTube video transcripts
//! (closed captions) without an API key, by scraping the caption track
//! metadata embedded in the watch page.
//!
//! The module exposes a `TranscriptSource` trait so consumers can swap the
//! real client for a test double.

mod transcript;
mod video_id;

pub use transcript::youtube::YtTranscriptClient;
pub use transcript::{Transcript, TranscriptError, TranscriptSegment, TranscriptSource};
pub use video_id::VideoId;
