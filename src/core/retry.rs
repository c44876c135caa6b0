//! Bounded retry with exponential backoff for Record Store and network calls.

use crate::errors::AppResult;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Run `call` until it succeeds, fails with a non-transient error, or the
    /// attempts are exhausted. The delay doubles after each failure up to
    /// `max_delay`.
    pub fn run<T, F>(&self, op: &str, mut call: F) -> AppResult<T>
    where
        F: FnMut() -> AppResult<T>,
    {
        let attempts = self.max_attempts.max(1);
        let mut delay = self.initial_delay;

        let mut attempt = 1;

        loop {
            match call() {
                Ok(v) => return Ok(v),
                Err(e) if e.is_transient() && attempt < attempts => {
                    tracing::warn!(
                        op,
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        "transient failure, retrying: {e}"
                    );
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                    delay = (delay * 2).min(self.max_delay);
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_transient() {
                        tracing::error!(op, attempts, "retries exhausted: {e}");
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::cell::Cell;

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn transient_errors_are_retried_until_success() {
        let calls = Cell::new(0);
        let out = fast(3).run("flaky", || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(AppError::TransientIo("reset by peer".into()))
            } else {
                Ok(7)
            }
        });
        assert_eq!(out.unwrap(), 7);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn attempts_are_bounded() {
        let calls = Cell::new(0);
        let out: AppResult<()> = fast(2).run("down", || {
            calls.set(calls.get() + 1);
            Err(AppError::TransientIo("unreachable".into()))
        });
        assert!(matches!(out, Err(AppError::TransientIo(_))));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn validation_errors_are_not_retried() {
        let calls = Cell::new(0);
        let out: AppResult<()> = fast(5).run("invalid", || {
            calls.set(calls.get() + 1);
            Err(AppError::Validation("empty".into()))
        });
        assert!(out.is_err());
        assert_eq!(calls.get(), 1);
    }
}
