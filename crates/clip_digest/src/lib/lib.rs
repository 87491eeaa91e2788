//! # clip_digest
//!
//! Summarizes long YouTube transcripts with a generative text service.
//!
//! The pipeline splits a transcript into chunks that fit within the
//! service's input window, summarizes them concurrently behind a shared
//! rate limiter, retries the retryable failures, and recombines the
//! partial summaries into one coherent result.

mod chunker;
mod combiner;
mod error;
mod limiter;
mod llm;
mod pipeline;
mod retry;
pub mod server;
pub mod tracing;

pub use chunker::{split_text, Chunk};
pub use error::PipelineError;
pub use limiter::RateLimiter;
pub use llm::gemini;
pub use llm::summarizer::{LlmError, Summarizer};
pub use pipeline::{builder::SummaryPipelineBuilder, SummaryPipeline};
pub use retry::{RetryDecision, RetryPolicy};
