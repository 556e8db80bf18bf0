//! Bounded fixed-backoff retry for optimistic writes.
//!
//! The combinator knows nothing about stores: the operation reports whether
//! it finished or lost a race, and the combinator decides whether another
//! attempt is allowed. The only side effect it performs itself is sleeping
//! on the injected [`Clock`].

use std::future::Future;
use std::time::Duration;

use prayerhub_core::config::RetryConfig;
use prayerhub_core::traits::Clock;

/// Attempt limit and delay for [`retry_on_conflict`].
///
/// The delay is fixed: no exponential growth and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay between consecutive attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            backoff: config.backoff(),
        }
    }
}

/// What a single attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    /// The operation finished; stop retrying.
    Done(T),
    /// The operation lost a race and may be retried.
    Retry,
}

/// Final result of [`retry_on_conflict`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// An attempt finished with a value.
    Completed {
        /// The value.
        value: T,
        /// 1-based number of the attempt that finished.
        attempts: u32,
    },
    /// Every allowed attempt asked for a retry.
    Exhausted {
        /// Attempts made.
        attempts: u32,
    },
}

/// Run `op` until it finishes, fails, or uses up `policy.max_attempts`.
///
/// `op` receives the 1-based attempt number. An `Err` from `op` is returned
/// immediately and never retried.
pub async fn retry_on_conflict<T, E, F, Fut>(
    policy: &RetryPolicy,
    clock: &dyn Clock,
    mut op: F,
) -> Result<RetryOutcome<T>, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Attempt<T>, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match op(attempt + 1).await? {
            Attempt::Done(value) => {
                return Ok(RetryOutcome::Completed {
                    value,
                    attempts: attempt + 1,
                });
            }
            Attempt::Retry => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Ok(RetryOutcome::Exhausted { attempts: attempt });
                }
                clock.sleep(policy.backoff).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingClock;

    #[tokio::test]
    async fn test_done_on_first_attempt_never_sleeps() {
        let clock = RecordingClock::default();
        let outcome: Result<_, ()> =
            retry_on_conflict(&RetryPolicy::default(), &clock, |_| async {
                Ok(Attempt::Done("ok"))
            })
            .await;

        assert_eq!(
            outcome,
            Ok(RetryOutcome::Completed {
                value: "ok",
                attempts: 1
            })
        );
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_exhaustion_makes_max_attempts_with_fixed_gaps() {
        let clock = RecordingClock::default();
        let mut calls = Vec::new();

        let outcome: Result<RetryOutcome<()>, ()> =
            retry_on_conflict(&RetryPolicy::default(), &clock, |attempt| {
                calls.push(attempt);
                async { Ok(Attempt::Retry) }
            })
            .await;

        assert_eq!(outcome, Ok(RetryOutcome::Exhausted { attempts: 3 }));
        assert_eq!(calls, vec![1, 2, 3]);
        assert_eq!(
            clock.sleeps(),
            vec![Duration::from_millis(100), Duration::from_millis(100)]
        );
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_conflicts() {
        let clock = RecordingClock::default();
        let outcome: Result<_, ()> =
            retry_on_conflict(&RetryPolicy::default(), &clock, |attempt| async move {
                if attempt < 3 {
                    Ok(Attempt::Retry)
                } else {
                    Ok(Attempt::Done(attempt))
                }
            })
            .await;

        assert_eq!(
            outcome,
            Ok(RetryOutcome::Completed {
                value: 3,
                attempts: 3
            })
        );
        assert_eq!(clock.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn test_error_is_not_retried() {
        let clock = RecordingClock::default();
        let mut calls = 0;
        let outcome: Result<RetryOutcome<()>, &str> =
            retry_on_conflict(&RetryPolicy::default(), &clock, |_| {
                calls += 1;
                async { Err("boom") }
            })
            .await;

        assert_eq!(outcome, Err("boom"));
        assert_eq!(calls, 1);
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_zero_attempts_behaves_as_one() {
        let clock = RecordingClock::default();
        let policy = RetryPolicy {
            max_attempts: 0,
            backoff: Duration::from_millis(5),
        };
        let outcome: Result<RetryOutcome<()>, ()> =
            retry_on_conflict(&policy, &clock, |_| async { Ok(Attempt::Retry) }).await;
        assert_eq!(outcome, Ok(RetryOutcome::Exhausted { attempts: 1 }));
    }
}
