use crate::{ErrorKind, GenerativeModelError};
use rand::Rng;
use std::{fmt, future::Future, ops::RangeInclusive, time::Duration};

/// How a failed attempt should be treated by [`with_retries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Retried until the policy's `max_attempts` is reached.
    Transient,
    /// Could not be classified. Gets `unclassified_attempts` in total.
    Unclassified,
    /// Surfaced immediately.
    Terminal,
}

impl From<ErrorKind> for RetryClass {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Transient => Self::Transient,
            ErrorKind::Unknown => Self::Unclassified,
            ErrorKind::Credential
            | ErrorKind::RequestShape
            | ErrorKind::Safety
            | ErrorKind::Parse => Self::Terminal,
        }
    }
}

/// Exponential backoff with jitter. The delay after the n-th failed attempt
/// (0-based) is `base_delay * 2^n * jitter`, with the jitter factor drawn
/// uniformly from `jitter`.
pub struct RetryPolicy<E> {
    pub max_attempts: u32,
    pub unclassified_attempts: u32,
    pub base_delay: Duration,
    pub jitter: RangeInclusive<f64>,
    pub classifier: fn(&E) -> RetryClass,
}

impl<E> RetryPolicy<E> {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
    pub const DEFAULT_UNCLASSIFIED_ATTEMPTS: u32 = 2;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

    pub fn new(classifier: fn(&E) -> RetryClass) -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            unclassified_attempts: Self::DEFAULT_UNCLASSIFIED_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
            jitter: 0.8..=1.2,
            classifier,
        }
    }

    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn unclassified_attempts(mut self, attempts: u32) -> Self {
        self.unclassified_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    #[must_use]
    pub fn jitter(mut self, jitter: RangeInclusive<f64>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Backoff to wait after the failed attempt `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let (low, high) = (*self.jitter.start(), *self.jitter.end());
        let factor = if low < high {
            rand::thread_rng().gen_range(low..=high)
        } else {
            low
        };
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        Duration::try_from_secs_f64(self.base_delay.as_secs_f64() * 2f64.powi(exponent) * factor)
            .unwrap_or(Duration::MAX)
    }

    fn attempt_limit(&self, class: RetryClass) -> u32 {
        match class {
            RetryClass::Transient => self.max_attempts,
            RetryClass::Unclassified => self.unclassified_attempts.min(self.max_attempts),
            RetryClass::Terminal => 1,
        }
    }
}

impl Default for RetryPolicy<GenerativeModelError> {
    fn default() -> Self {
        Self::new(|error| error.kind().into())
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            max_attempts: self.max_attempts,
            unclassified_attempts: self.unclassified_attempts,
            base_delay: self.base_delay,
            jitter: self.jitter.clone(),
            classifier: self.classifier,
        }
    }
}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("unclassified_attempts", &self.unclassified_attempts)
            .field("base_delay", &self.base_delay)
            .field("jitter", &self.jitter)
            .finish_non_exhaustive()
    }
}

/// Run `operation` until it succeeds, its error is classified terminal, or
/// the attempt budget for its class is spent. The last error is returned
/// as-is.
pub async fn with_retries<T, E, F, Fut>(policy: &RetryPolicy<E>, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let class = (policy.classifier)(&error);
                if attempt >= policy.attempt_limit(class) {
                    return Err(error);
                }
                let delay = policy.delay_for(attempt - 1);
                tracing::warn!(
                    attempt,
                    ?class,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %error,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    };

    #[derive(Debug)]
    struct TestError(RetryClass);

    impl fmt::Display for TestError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test error ({:?})", self.0)
        }
    }

    fn fast_policy() -> RetryPolicy<TestError> {
        RetryPolicy::new(|error: &TestError| error.0).base_delay(Duration::from_millis(1))
    }

    async fn run(failures: u32, class: RetryClass) -> (Result<&'static str, TestError>, u32) {
        let calls = Arc::new(AtomicU32::new(0));
        let result = with_retries(&fast_policy(), || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < failures {
                    Err(TestError(class))
                } else {
                    Ok("done")
                }
            }
        })
        .await;
        (result, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let (result, calls) = run(4, RetryClass::Transient).await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls, 5);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let (result, calls) = run(u32::MAX, RetryClass::Transient).await;
        assert!(result.is_err());
        assert_eq!(calls, 5);
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let (result, calls) = run(u32::MAX, RetryClass::Terminal).await;
        assert!(matches!(result, Err(TestError(RetryClass::Terminal))));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn unclassified_errors_get_one_more_attempt() {
        let (result, calls) = run(u32::MAX, RetryClass::Unclassified).await;
        assert!(result.is_err());
        assert_eq!(calls, 2);

        let (result, calls) = run(1, RetryClass::Unclassified).await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls, 2);
    }

    #[test]
    fn delay_grows_exponentially_within_jitter_bounds() {
        let policy = RetryPolicy::new(|error: &TestError| error.0)
            .base_delay(Duration::from_millis(100));
        for _ in 0..50 {
            let delay = policy.delay_for(2);
            assert!(delay >= Duration::from_millis(319), "{delay:?}");
            assert!(delay <= Duration::from_millis(481), "{delay:?}");
        }
        let fixed = policy.jitter(1.0..=1.0);
        assert_eq!(fixed.delay_for(0), Duration::from_millis(100));
        assert_eq!(fixed.delay_for(3), Duration::from_millis(800));
    }

    #[test]
    fn default_policy_uses_error_kind() {
        let policy = RetryPolicy::<GenerativeModelError>::default();
        let busy = GenerativeModelError::StatusCode(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            String::new(),
        );
        let bad_key = GenerativeModelError::StatusCode(
            reqwest::StatusCode::BAD_REQUEST,
            "API key not valid".into(),
        );
        assert_eq!((policy.classifier)(&busy), RetryClass::Transient);
        assert_eq!((policy.classifier)(&bad_key), RetryClass::Terminal);
        assert_eq!(policy.max_attempts, 5);
    }
}
