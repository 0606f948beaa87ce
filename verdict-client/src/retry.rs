//! # Call retries
//!
//! Wraps unary calls with bounded retries. An attempt is retried when the
//! server reports `UNAVAILABLE` or `RESOURCE_EXHAUSTED`, or when it does not
//! respond within the per-attempt timeout. Other failures, including a
//! `DEADLINE_EXCEEDED` raised by the server itself, are returned as-is.
//!
//! Delays grow linearly with the attempt number and carry jitter to avoid
//! thundering herd effects when many clients lose the same server.

use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;
use tonic::{Code, Status};
use tracing::warn;

const BACKOFF_STEP: Duration = Duration::from_millis(50);

/// Retry knobs resolved from the client options.
///
/// Setting either knob to zero disables retries entirely, including the
/// per-attempt timeout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub(crate) max_attempts: u32,
    pub(crate) per_attempt_timeout: Duration,
}

impl RetryPolicy {
    fn enabled(&self) -> bool {
        self.max_attempts > 0 && !self.per_attempt_timeout.is_zero()
    }
}

/// Summary of a finished call, reported to a [`CallObserver`].
#[derive(Debug, Clone, Copy)]
pub struct CallStats {
    /// RPC method name, e.g. `CheckResources`.
    pub method: &'static str,
    /// Attempts made, including the successful or final failing one.
    pub attempts: u32,
    /// Wall-clock time spent across all attempts.
    pub elapsed: Duration,
    /// Final status code of the call.
    pub code: Code,
}

/// Receives a [`CallStats`] for every finished call.
pub trait CallObserver: Send + Sync {
    fn on_call(&self, stats: CallStats);
}

enum Attempt<T> {
    Done(Result<tonic::Response<T>, Status>),
    TimedOut,
}

pub(crate) async fn call_with_retries<T, F, Fut>(
    policy: RetryPolicy,
    observer: Option<&dyn CallObserver>,
    method: &'static str,
    mut operation: F,
) -> Result<T, Status>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<tonic::Response<T>, Status>>,
{
    let started = Instant::now();
    let max_attempts = if policy.enabled() {
        policy.max_attempts
    } else {
        1
    };
    let mut attempt = 1u32;

    loop {
        let outcome = if policy.enabled() {
            match tokio::time::timeout(policy.per_attempt_timeout, operation()).await {
                Ok(result) => Attempt::Done(result),
                Err(_) => Attempt::TimedOut,
            }
        } else {
            Attempt::Done(operation().await)
        };

        match outcome {
            Attempt::Done(Ok(response)) => {
                notify(observer, method, attempt, started.elapsed(), Code::Ok);
                return Ok(response.into_inner());
            }
            Attempt::Done(Err(status)) => {
                if attempt >= max_attempts || !is_retriable(status.code()) {
                    notify(observer, method, attempt, started.elapsed(), status.code());
                    return Err(status);
                }

                let delay = backoff_delay(attempt);
                warn!(
                    method,
                    attempt,
                    code = %status.code(),
                    delay_ms = delay.as_millis(),
                    "call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Attempt::TimedOut => {
                if attempt >= max_attempts {
                    let status = Status::deadline_exceeded(format!(
                        "no response from server after {attempt} attempts"
                    ));
                    notify(observer, method, attempt, started.elapsed(), status.code());
                    return Err(status);
                }

                let delay = backoff_delay(attempt);
                warn!(
                    method,
                    attempt,
                    delay_ms = delay.as_millis(),
                    "call timed out, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }

        attempt += 1;
    }
}

fn is_retriable(code: Code) -> bool {
    matches!(code, Code::Unavailable | Code::ResourceExhausted)
}

fn backoff_delay(attempt: u32) -> Duration {
    // Jitter: 0.5x to 1.5x of the linear delay.
    let jitter = rand::thread_rng().gen_range(0.5..1.5);
    (BACKOFF_STEP * attempt).mul_f64(jitter)
}

fn notify(
    observer: Option<&dyn CallObserver>,
    method: &'static str,
    attempts: u32,
    elapsed: Duration,
    code: Code,
) {
    if let Some(observer) = observer {
        observer.on_call(CallStats {
            method,
            attempts,
            elapsed,
            code,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn policy(max_attempts: u32, per_attempt_timeout: Duration) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            per_attempt_timeout,
        }
    }

    #[tokio::test]
    async fn returns_first_success() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result = call_with_retries(
            policy(3, Duration::from_secs(1)),
            None,
            "CheckResources",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(tonic::Response::new(42))
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_unavailable_until_success() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result = call_with_retries(
            policy(3, Duration::from_secs(1)),
            None,
            "CheckResources",
            || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(Status::unavailable("server starting"))
                    } else {
                        Ok(tonic::Response::new(42))
                    }
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<u32, Status> = call_with_retries(
            policy(3, Duration::from_secs(1)),
            None,
            "CheckResources",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(Status::unavailable("still down"))
                }
            },
        )
        .await;

        assert_eq!(result.unwrap_err().code(), Code::Unavailable);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retriable_codes_fail_immediately() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<u32, Status> = call_with_retries(
            policy(3, Duration::from_secs(1)),
            None,
            "CheckResources",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(Status::invalid_argument("bad request"))
                }
            },
        )
        .await;

        assert_eq!(result.unwrap_err().code(), Code::InvalidArgument);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn server_deadline_exceeded_is_not_retried() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<u32, Status> = call_with_retries(
            policy(3, Duration::from_secs(1)),
            None,
            "CheckResources",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(Status::deadline_exceeded("server side timeout"))
                }
            },
        )
        .await;

        assert_eq!(result.unwrap_err().code(), Code::DeadlineExceeded);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_attempts_time_out_and_retry() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<u32, Status> = call_with_retries(
            policy(2, Duration::from_millis(20)),
            None,
            "CheckResources",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    std::future::pending().await
                }
            },
        )
        .await;

        assert_eq!(result.unwrap_err().code(), Code::DeadlineExceeded);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn zero_max_attempts_disables_retries() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result: Result<u32, Status> = call_with_retries(
            policy(0, Duration::from_secs(1)),
            None,
            "CheckResources",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(Status::unavailable("down"))
                }
            },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn observer_sees_attempts_and_final_code() {
        struct Recorder(std::sync::Mutex<Vec<CallStats>>);

        impl CallObserver for Recorder {
            fn on_call(&self, stats: CallStats) {
                self.0.lock().unwrap().push(stats);
            }
        }

        let recorder = Recorder(std::sync::Mutex::new(Vec::new()));
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let result = call_with_retries(
            policy(3, Duration::from_secs(1)),
            Some(&recorder),
            "PlanResources",
            || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 1 {
                        Err(Status::unavailable("server starting"))
                    } else {
                        Ok(tonic::Response::new(()))
                    }
                }
            },
        )
        .await;

        assert!(result.is_ok());
        let stats = recorder.0.into_inner().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].method, "PlanResources");
        assert_eq!(stats[0].attempts, 2);
        assert_eq!(stats[0].code, Code::Ok);
    }
}
