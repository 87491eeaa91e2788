use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::limiter::RateLimiter;
use crate::llm::summarizer::Summarizer;
use crate::retry::RetryPolicy;

use super::{
    SummaryPipeline, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MAX_CONCURRENCY, DEFAULT_RATE_LIMIT,
    DEFAULT_RATE_WINDOW,
};

pub struct SummaryPipelineBuilder<S = ()> {
    summarizer: S,
    limiter: Option<Arc<RateLimiter>>,
    retry_policy: RetryPolicy,
    max_chunk_size: usize,
    max_concurrency: usize,
    cancel: CancellationToken,
}

impl SummaryPipelineBuilder {
    pub fn new() -> Self {
        Self {
            summarizer: (),
            limiter: None,
            retry_policy: RetryPolicy::default(),
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            cancel: CancellationToken::new(),
        }
    }
}

impl Default for SummaryPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SummaryPipelineBuilder<S> {
    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<S2> {
        SummaryPipelineBuilder {
            summarizer,
            limiter: self.limiter,
            retry_policy: self.retry_policy,
            max_chunk_size: self.max_chunk_size,
            max_concurrency: self.max_concurrency,
            cancel: self.cancel,
        }
    }

    /// Configures a limiter owned by this pipeline alone.
    pub fn rate_limit(mut self, limit: u32, window: Duration) -> Self {
        self.limiter = Some(Arc::new(RateLimiter::new(limit, window)));
        self
    }

    /// Shares an existing limiter across pipelines so they honor one
    /// process-wide quota with the upstream service.
    pub fn shared_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.max_chunk_size = max_chunk_size;
        self
    }

    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Cancelling this token tears down in-flight jobs at their next
    /// suspension point.
    pub fn cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

impl<S> SummaryPipelineBuilder<S>
where
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<S> {
        SummaryPipeline {
            summarizer: self.summarizer,
            limiter: self.limiter.unwrap_or_else(|| {
                Arc::new(RateLimiter::new(DEFAULT_RATE_LIMIT, DEFAULT_RATE_WINDOW))
            }),
            retry_policy: self.retry_policy,
            max_chunk_size: self.max_chunk_size,
            max_concurrency: self.max_concurrency,
            cancel: self.cancel,
        }
    }
}
