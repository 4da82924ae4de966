//! Fallback ⊃ Retry ⊃ Timeout execution.

use std::fmt::Display;
use std::sync::Arc;
use std::thread;

use tracing::{debug, error, warn};

use crate::config::PipelineConfig;
use crate::error::{PolicyError, ResilienceError};
use crate::timeout;

/// Where the value returned by the pipeline came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// An attempt of the wrapped operation succeeded.
    Operation,
    /// Every attempt failed; the configured fallback was used.
    Fallback,
}

/// Outcome of one pipeline execution, with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution<T> {
    pub value: T,
    /// Attempts made, including the successful one (1..=max_retries + 1).
    pub attempts: u32,
    pub source: Source,
    /// Failure of the last failed attempt, if any attempt failed.
    pub last_error: Option<PolicyError>,
}

impl<T> Execution<T> {
    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }
}

/// Resilience pipeline: a total, bounded-latency wrapper around a fallible
/// operation.
///
/// The pipeline holds no state between executions; retry counters live on the
/// stack of a single [`Pipeline::execute`] call.
#[derive(Debug, Clone)]
pub struct Pipeline<T> {
    config: PipelineConfig<T>,
}

impl<T> Pipeline<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(config: PipelineConfig<T>) -> Result<Self, ResilienceError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig<T> {
        &self.config
    }

    /// Execute `operation` under the configured policies.
    ///
    /// Never fails: returns the operation's value or the fallback.
    pub fn execute<F, E>(&self, operation: F) -> T
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Display + 'static,
    {
        self.execute_with_report(operation).value
    }

    /// Like [`Pipeline::execute`], also reporting attempts and value source.
    pub fn execute_with_report<F, E>(&self, operation: F) -> Execution<T>
    where
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Display + 'static,
    {
        let operation = Arc::new(operation);
        let mut last_error = None;
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(
                attempt,
                timeout = ?self.config.timeout,
                "starting attempt"
            );

            let err = match timeout::run_attempt(&operation, self.config.timeout, attempt) {
                Ok(value) => {
                    debug!(attempt, "attempt succeeded");
                    return Execution {
                        value,
                        attempts: attempt,
                        source: Source::Operation,
                        last_error,
                    };
                }
                Err(err) => err,
            };

            if attempt > self.config.max_retries {
                return self.fall_back(err, attempt);
            }

            // The retry about to run carries the number of the attempt that failed.
            match &self.config.retry_observer {
                Some(observer) => observer(attempt, &err),
                None => warn!(retry = attempt, error = %err, "attempt failed; retrying"),
            }
            last_error = Some(err);

            let delay = self.config.backoff.delay_for_retry(attempt);
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        }
    }

    fn fall_back(&self, err: PolicyError, attempts: u32) -> Execution<T> {
        match &self.config.fallback_observer {
            Some(observer) => observer(&err),
            None => error!(attempts, error = %err, "retries exhausted; using fallback value"),
        }
        Execution {
            value: self.config.fallback.clone(),
            attempts,
            source: Source::Fallback,
            last_error: Some(err),
        }
    }
}
