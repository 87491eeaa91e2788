pub mod summarizer;
pub mod transcripts;
