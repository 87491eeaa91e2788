//! # Summary Pipeline
//!
//! The orchestrator that turns one long transcript into one summary:
//! chunk, rate-limit, submit, retry, reorder, combine.

use std::sync::Arc;
use std::time::Duration;

use futures::{stream, StreamExt, TryStreamExt};
use itertools::Itertools;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::chunker::{split_text, Chunk};
use crate::combiner::build_combine_prompt;
use crate::error::PipelineError;
use crate::limiter::RateLimiter;
use crate::llm::summarizer::{LlmError, Summarizer};
use crate::retry::{RetryDecision, RetryPolicy};

pub mod builder;

const DEFAULT_RATE_LIMIT: u32 = 60;
const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(60);
const DEFAULT_MAX_CHUNK_SIZE: usize = 5000;
const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// One pending submission: a chunk of transcript text, or the combine
/// prompt in the final pass. Owned by exactly one driving future, so the
/// same piece of work can never be in flight twice.
#[derive(Debug)]
struct SummarizationTask {
    chunk: Chunk,
    kind: TaskKind,
    attempts: u32,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskKind {
    Chunk,
    Combine,
}

impl SummarizationTask {
    fn chunk(chunk: Chunk) -> Self {
        Self {
            chunk,
            kind: TaskKind::Chunk,
            attempts: 0,
            created_at: Instant::now(),
        }
    }

    fn combine(index: usize, prompt: String) -> Self {
        Self {
            chunk: Chunk {
                index,
                content: prompt,
            },
            kind: TaskKind::Combine,
            attempts: 0,
            created_at: Instant::now(),
        }
    }

    fn into_failure(self, source: LlmError) -> PipelineError {
        match self.kind {
            TaskKind::Chunk => PipelineError::ChunkFailed {
                index: self.chunk.index,
                attempts: self.attempts,
                source,
            },
            TaskKind::Combine => PipelineError::CombineFailed {
                attempts: self.attempts,
                source,
            },
        }
    }
}

/// The core summarization pipeline over a pluggable [`Summarizer`].
pub struct SummaryPipeline<S>
where
    S: Summarizer + Send + Sync + 'static,
{
    summarizer: S,
    limiter: Arc<RateLimiter>,
    retry_policy: RetryPolicy,
    max_chunk_size: usize,
    max_concurrency: usize,
    cancel: CancellationToken,
}

impl<S> SummaryPipeline<S>
where
    S: Summarizer + Send + Sync + 'static,
{
    /// Summarizes `text`, however long, into a single result.
    ///
    /// Chunks are submitted with bounded concurrency; partial summaries are
    /// reordered by chunk index before the combine pass regardless of
    /// completion order. A single chunk's summary is returned as-is with no
    /// combine call. Any task's permanent failure aborts the whole job.
    #[tracing::instrument(skip_all)]
    pub async fn summarize_text(&self, text: &str) -> Result<String, PipelineError> {
        let chunks = split_text(text, self.max_chunk_size);
        if chunks.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let total = chunks.len();
        tracing::info!(chunks = total, "Submitting transcript chunks");

        let tasks = chunks.into_iter().map(SummarizationTask::chunk);
        let partials: Vec<(usize, String)> = stream::iter(tasks.map(|task| self.drive(task)))
            .buffer_unordered(self.max_concurrency.max(1))
            .try_collect()
            .await?;

        let mut summaries: Vec<String> = partials
            .into_iter()
            .sorted_by_key(|(index, _)| *index)
            .map(|(_, summary)| summary)
            .collect();

        if summaries.len() == 1 {
            return Ok(summaries.remove(0));
        }

        tracing::info!(parts = summaries.len(), "Combining partial summaries");
        let prompt = build_combine_prompt(&summaries);
        let (_, combined) = self.drive(SummarizationTask::combine(total, prompt)).await?;

        Ok(combined)
    }

    /// Drives one task to resolution: admit, submit, classify, back off,
    /// repeat. Cancellation is observed at every suspension point.
    #[tracing::instrument(skip_all, fields(index = task.chunk.index, kind = ?task.kind))]
    async fn drive(&self, mut task: SummarizationTask) -> Result<(usize, String), PipelineError> {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return Err(PipelineError::Cancelled),
                _ = self.limiter.admit() => {}
            }

            task.attempts += 1;

            let outcome = tokio::select! {
                _ = self.cancel.cancelled() => return Err(PipelineError::Cancelled),
                outcome = self.submit(&task) => outcome,
            };

            let error = match outcome {
                Ok(summary) => return Ok((task.chunk.index, summary)),
                Err(error) => error,
            };

            let window_remaining = self.limiter.time_until_reset().await;
            match self
                .retry_policy
                .decide(&error, task.attempts, window_remaining)
            {
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        attempts = task.attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Submission failed, retrying"
                    );
                    tokio::select! {
                        _ = self.cancel.cancelled() => return Err(PipelineError::Cancelled),
                        _ = sleep(delay) => {}
                    }
                }
                RetryDecision::GiveUp => {
                    tracing::error!(
                        attempts = task.attempts,
                        age_ms = task.created_at.elapsed().as_millis() as u64,
                        error = %error,
                        "Submission failed permanently"
                    );
                    return Err(task.into_failure(error));
                }
            }
        }
    }

    async fn submit(&self, task: &SummarizationTask) -> Result<String, LlmError> {
        match task.kind {
            TaskKind::Chunk => self.summarizer.summarize(&task.chunk.content).await,
            TaskKind::Combine => self.summarizer.generate(&task.chunk.content).await,
        }
    }
}
