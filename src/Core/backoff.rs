// Caller-side retry strategies for a failed poke/peek.
// The ring itself never waits; these are used by the blocking helpers on
// Producer/Consumer and by callers driving their own retry loops.

use crossbeam_utils::Backoff;
use std::time::Duration;

/// How to wait between two failed reservation attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Exponential spinning that escalates to yielding the time slice.
    #[default]
    Spin,
    /// Yield the time slice on every failed attempt.
    Yield,
    /// Sleep for a fixed duration on every failed attempt.
    Sleep(Duration),
}

impl RetryPolicy {
    /// Create the per-loop wait state for this policy.
    pub fn waiter(self) -> Waiter {
        Waiter {
            policy: self,
            backoff: Backoff::new(),
        }
    }
}

/// Wait state of one retry loop.
pub struct Waiter {
    policy: RetryPolicy,
    backoff: Backoff,
}

impl Waiter {
    /// Wait once, after a failed attempt.
    pub fn wait(&mut self) {
        match self.policy {
            RetryPolicy::Spin => self.backoff.snooze(),
            RetryPolicy::Yield => std::thread::yield_now(),
            RetryPolicy::Sleep(period) => std::thread::sleep(period),
        }
    }

    /// Forget accumulated backoff, after a successful attempt.
    pub fn reset(&mut self) {
        self.backoff.reset();
    }
}
