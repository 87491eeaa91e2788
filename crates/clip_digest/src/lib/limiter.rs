//! # Rate Limiter
//!
//! Fixed-window admission control for outbound service calls: at most
//! `limit` admissions per window, counted under a mutex so concurrent
//! callers can never overshoot. Excess callers suspend until the window
//! resets; nothing is ever rejected or dropped.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

pub struct RateLimiter {
    limit: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

#[derive(Debug)]
struct WindowState {
    count: u32,
    window_started_at: Instant,
}

impl WindowState {
    /// Advances the window origin in whole-window steps so boundaries stay
    /// aligned no matter how long the limiter sat idle.
    fn roll_forward(&mut self, now: Instant, window: Duration) {
        while now >= self.window_started_at + window {
            self.window_started_at += window;
            self.count = 0;
        }
    }
}

impl RateLimiter {
    /// Creates a limiter admitting `limit` calls per `window`.
    ///
    /// A zero limit would never admit anything and a zero window never
    /// resets; both are normalized to the smallest usable value.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit: limit.max(1),
            window: window.max(Duration::from_millis(1)),
            state: Mutex::new(WindowState {
                count: 0,
                window_started_at: Instant::now(),
            }),
        }
    }

    /// Suspends until a submission slot is free in the current window, then
    /// claims it.
    ///
    /// Waiters sleep until the window's computed end and re-check; a waiter
    /// that loses the race for the fresh window's slots sleeps into the next
    /// one. Admission order among concurrent waiters is unspecified.
    pub async fn admit(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();
                state.roll_forward(now, self.window);

                if state.count < self.limit {
                    state.count += 1;
                    return;
                }

                (state.window_started_at + self.window).duration_since(now)
            };

            sleep(wait).await;
        }
    }

    /// Time left until the current window resets and its budget refills.
    pub async fn time_until_reset(&self) -> Duration {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        state.roll_forward(now, self.window);

        (state.window_started_at + self.window).duration_since(now)
    }
}
