//! Bounded retry with backoff and a fallback on exhaustion.
//!
//! `execute` always produces a value of the operation's success type: either
//! the operation's own result, or whatever the fallback synthesizes from the
//! last error once the retry budget is spent or a failure is classified as
//! not worth retrying.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use common::RetryConfig;

/// Wait between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    Fixed(Duration),
    Exponential {
        initial: Duration,
        multiplier: f64,
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed(delay) => *delay,
            Backoff::Exponential {
                initial,
                multiplier,
                max,
            } => {
                let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
                let secs = initial.as_secs_f64() * multiplier.powi(exponent);
                Duration::try_from_secs_f64(secs)
                    .map(|delay| delay.min(*max))
                    .unwrap_or(*max)
            }
        }
    }
}

/// State handed to the fallback once attempts stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryAttempt<E> {
    pub attempt_number: u32,
    pub last_error: E,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Backoff,
}

impl RetryPolicy {
    /// `max_attempts` counts the first call; values below 1 are raised to 1.
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or `max_attempts` is reached; in the latter two cases return
    /// `fallback(last attempt)`.
    pub async fn execute<T, E, Op, Fut, C, F>(
        &self,
        operation_name: &str,
        mut operation: Op,
        is_retryable: C,
        fallback: F,
    ) -> T
    where
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Fn(&E) -> bool,
        F: FnOnce(RetryAttempt<E>) -> T,
        E: Display,
    {
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(operation = operation_name, attempt, "Succeeded after retry");
                    }
                    return value;
                }
                Err(err) => {
                    let retryable = is_retryable(&err);

                    if !retryable || attempt >= self.max_attempts {
                        warn!(
                            operation = operation_name,
                            attempt,
                            max_attempts = self.max_attempts,
                            retryable,
                            error = %err,
                            "Giving up, using fallback"
                        );
                        return fallback(RetryAttempt {
                            attempt_number: attempt,
                            last_error: err,
                        });
                    }

                    let delay = self.backoff.delay(attempt);
                    warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        retry_in_ms = delay.as_millis() as u64,
                        "Transient failure, retrying"
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        let initial = Duration::from_millis(config.initial_delay_ms);
        let backoff = if config.multiplier <= 1.0 {
            Backoff::Fixed(initial)
        } else {
            Backoff::Exponential {
                initial,
                multiplier: config.multiplier,
                max: Duration::from_millis(config.max_delay_ms),
            }
        };
        RetryPolicy::new(config.max_attempts, backoff)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Failure {
        Transient,
        Permanent,
    }

    impl Display for Failure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn is_transient(err: &Failure) -> bool {
        *err == Failure::Transient
    }

    fn no_wait(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Backoff::Fixed(Duration::ZERO))
    }

    /// Operation failing `failures` times with `kind`, then returning the attempt count.
    fn flaky(
        calls: Arc<AtomicU32>,
        failures: u32,
        kind: Failure,
    ) -> impl FnMut() -> std::future::Ready<Result<u32, Failure>> {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if n <= failures { Err(kind.clone()) } else { Ok(n) })
        }
    }

    #[tokio::test]
    async fn test_first_success_makes_one_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = no_wait(3)
            .execute("op", flaky(calls.clone(), 0, Failure::Transient), is_transient, |_| 0)
            .await;

        assert_eq!(result, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_k_transient_failures() {
        for k in 0..4 {
            let calls = Arc::new(AtomicU32::new(0));
            let result = no_wait(5)
                .execute("op", flaky(calls.clone(), k, Failure::Transient), is_transient, |_| 0)
                .await;

            assert_eq!(result, k + 1);
            assert_eq!(calls.load(Ordering::SeqCst), k + 1);
        }
    }

    #[tokio::test]
    async fn test_exhaustion_invokes_fallback_with_last_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = no_wait(3)
            .execute(
                "op",
                flaky(calls.clone(), u32::MAX, Failure::Transient),
                is_transient,
                |exhausted| {
                    assert_eq!(exhausted.attempt_number, 3);
                    assert_eq!(exhausted.last_error, Failure::Transient);
                    999
                },
            )
            .await;

        assert_eq!(result, 999);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_failure_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = no_wait(5)
            .execute(
                "op",
                flaky(calls.clone(), u32::MAX, Failure::Permanent),
                is_transient,
                |exhausted| exhausted.attempt_number * 100,
            )
            .await;

        assert_eq!(result, 100);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_attempt_policy_never_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = RetryPolicy::new(0, Backoff::Fixed(Duration::ZERO))
            .execute("op", flaky(calls.clone(), 1, Failure::Transient), is_transient, |_| 0)
            .await;

        assert_eq!(result, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_exponential_backoff_is_capped() {
        let backoff = Backoff::Exponential {
            initial: Duration::from_millis(100),
            multiplier: 2.0,
            max: Duration::from_millis(500),
        };

        assert_eq!(backoff.delay(1), Duration::from_millis(100));
        assert_eq!(backoff.delay(2), Duration::from_millis(200));
        assert_eq!(backoff.delay(3), Duration::from_millis(400));
        assert_eq!(backoff.delay(4), Duration::from_millis(500));
        assert_eq!(backoff.delay(u32::MAX), Duration::from_millis(500));
    }

    #[test]
    fn test_exponential_backoff_beyond_duration_range_uses_max() {
        let backoff = Backoff::Exponential {
            initial: Duration::from_secs(1),
            multiplier: 10.0,
            max: Duration::MAX,
        };

        assert_eq!(backoff.delay(3), Duration::from_secs(100));
        assert_eq!(backoff.delay(21), Duration::MAX);
        assert_eq!(backoff.delay(400), Duration::MAX);
    }

    #[test]
    fn test_policy_from_config() {
        let fixed = RetryPolicy::from(&RetryConfig::default());
        assert_eq!(fixed.max_attempts(), 3);
        assert_eq!(fixed.backoff(), &Backoff::Fixed(Duration::from_millis(500)));

        let growing = RetryPolicy::from(&RetryConfig {
            max_attempts: 4,
            initial_delay_ms: 50,
            multiplier: 3.0,
            max_delay_ms: 1000,
        });
        assert_eq!(growing.backoff().delay(2), Duration::from_millis(150));
    }
}
