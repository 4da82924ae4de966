//! `stockwatch-resilience` — fallback / retry / timeout execution pipeline.
//!
//! A [`Pipeline`] turns a partial operation (one that may fail, panic, or block
//! for too long) into a total one: [`Pipeline::execute`] always returns a value,
//! either the operation's result or the configured fallback.
//!
//! Policies nest in a fixed order, outermost first:
//!
//! ```text
//! Fallback ⊃ Retry ⊃ Timeout ⊃ operation
//! ```
//!
//! The timeout bounds each individual attempt, retry repeats failed or timed-out
//! attempts, and fallback substitutes the default once retries are exhausted.

pub mod config;
pub mod error;
pub mod pipeline;

mod timeout;

pub use config::{Backoff, FallbackObserver, PipelineConfig, RetryObserver};
pub use error::{PolicyError, ResilienceError};
pub use pipeline::{Execution, Pipeline, Source};
