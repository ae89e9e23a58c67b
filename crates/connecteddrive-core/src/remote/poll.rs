//! Bounded fixed-interval polling.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Number of execution state polls before giving up
pub const MAX_RETRIES: u32 = 9;

/// Delay before every poll, including the first one
pub const INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollSchedule {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            interval: INTERVAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The attempt returned a value on poll number `attempts`
    Ready { value: T, attempts: u32 },
    /// Every attempt returned `None`
    Exhausted { attempts: u32 },
    /// Cancelled while waiting for the next attempt
    Cancelled { attempts: u32 },
}

impl PollSchedule {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Longest time spent sleeping before the schedule is exhausted
    pub fn max_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }

    /// Run `attempt` up to `max_attempts` times, sleeping `interval` before
    /// each call. Stops at the first `Some`, or at the first error.
    ///
    /// `attempt` receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut attempt: F,
    ) -> Result<PollOutcome<T>, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        for n in 1..=self.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Ok(PollOutcome::Cancelled { attempts: n - 1 });
                }
                _ = tokio::time::sleep(self.interval) => {}
            }

            if let Some(value) = attempt(n).await? {
                return Ok(PollOutcome::Ready { value, attempts: n });
            }
        }

        Ok(PollOutcome::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
