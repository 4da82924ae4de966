//! Pipeline configuration.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{PolicyError, ResilienceError};

/// Called before each retry with the retry number (1-indexed) and the failure
/// that triggered it. Diagnostic only; it cannot change control flow. When set,
/// it replaces the pipeline's own `warn!` event for the retry.
pub type RetryObserver = Arc<dyn Fn(u32, &PolicyError) + Send + Sync>;

/// Called once when the fallback value is substituted, with the final failure.
/// When set, it replaces the pipeline's own `error!` event.
pub type FallbackObserver = Arc<dyn Fn(&PolicyError) + Send + Sync>;

/// Default per-attempt deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

/// Default number of retries after the first attempt (4 attempts total).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay inserted between a failed attempt and the next retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    /// Retry immediately.
    #[default]
    None,
    /// Same delay before every retry.
    Fixed(Duration),
    /// `base * retry` before each retry.
    Linear(Duration),
}

impl Backoff {
    /// Delay before the given retry (1-indexed).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        match *self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Linear(base) => base.saturating_mul(retry),
        }
    }
}

/// Configuration for a [`crate::Pipeline`].
///
/// The fallback value is part of the configuration, not of the pipeline, so the
/// same machinery serves any result type.
#[derive(Clone)]
pub struct PipelineConfig<T> {
    /// Deadline for each individual attempt.
    pub timeout: Duration,
    /// Retries after the first attempt (0 = single attempt).
    pub max_retries: u32,
    /// Pacing between attempts.
    pub backoff: Backoff,
    /// Value returned when every attempt failed.
    pub fallback: T,
    pub retry_observer: Option<RetryObserver>,
    pub fallback_observer: Option<FallbackObserver>,
}

impl<T> PipelineConfig<T> {
    /// Defaults: 100ms timeout, 3 retries, no backoff, no observers.
    pub fn new(fallback: T) -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Backoff::None,
            fallback,
            retry_observer: None,
            fallback_observer: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn on_retry<F>(mut self, observer: F) -> Self
    where
        F: Fn(u32, &PolicyError) + Send + Sync + 'static,
    {
        self.retry_observer = Some(Arc::new(observer));
        self
    }

    pub fn on_fallback<F>(mut self, observer: F) -> Self
    where
        F: Fn(&PolicyError) + Send + Sync + 'static,
    {
        self.fallback_observer = Some(Arc::new(observer));
        self
    }

    /// Total attempts the pipeline will make before falling back.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), ResilienceError> {
        if self.timeout.is_zero() {
            return Err(ResilienceError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for PipelineConfig<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("backoff", &self.backoff)
            .field("fallback", &self.fallback)
            .field("retry_observer", &self.retry_observer.is_some())
            .field("fallback_observer", &self.fallback_observer.is_some())
            .finish()
    }
}
