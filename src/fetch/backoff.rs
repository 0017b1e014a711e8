//! Retry timing.
//!
//! Wait durations are computed by [`Backoff`], a pure function of the attempt
//! number. Actually waiting goes through [`Sleeper`] so tests can record the
//! waits instead of serving them.

use std::time::Duration;

/// Linear backoff: the wait after the `n`th failed attempt is `n * step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    step: Duration,
}

impl Backoff {
    pub const DEFAULT_STEP: Duration = Duration::from_secs(5);

    #[must_use]
    pub fn linear(step: Duration) -> Self {
        Self { step }
    }

    /// Wait before retrying after failed attempt number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt)
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::linear(Self::DEFAULT_STEP)
    }
}

/// Blocks the current thread for a duration.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] that really sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}
