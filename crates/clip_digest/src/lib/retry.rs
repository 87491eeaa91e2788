//! # Retry Coordinator
//!
//! Decides whether a failed submission goes back through the rate limiter
//! for another attempt, and how long it must wait first. Decisions are pure
//! so the policy can be tested without a runtime.

use std::time::Duration;

use crate::llm::summarizer::LlmError;

/// What to do with a task whose submission just failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait this long, then resubmit through the rate limiter.
    RetryAfter(Duration),
    /// Surface the failure; retrying will not help or the budget is spent.
    GiveUp,
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    transient_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            transient_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, transient_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            transient_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Decides the fate of a task whose attempt number `attempts` failed
    /// with `error`.
    ///
    /// Rate-limited tasks wait out the upstream's `Retry-After` hint when it
    /// sent one, otherwise the remainder of the current window. Transient
    /// failures wait a fixed short delay. Fatal failures and exhausted
    /// budgets give up.
    pub fn decide(
        &self,
        error: &LlmError,
        attempts: u32,
        window_remaining: Duration,
    ) -> RetryDecision {
        if attempts >= self.max_attempts {
            return RetryDecision::GiveUp;
        }

        match error {
            LlmError::RateLimited { retry_after } => {
                RetryDecision::RetryAfter(retry_after.unwrap_or(window_remaining))
            }
            LlmError::Transient(_) => RetryDecision::RetryAfter(self.transient_delay),
            LlmError::Fatal { .. } => RetryDecision::GiveUp,
        }
    }
}
