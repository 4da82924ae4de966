//! Per-attempt deadline enforcement.
//!
//! Each attempt runs on its own thread and the caller waits on a channel with a
//! deadline. A blocking thread cannot be cancelled from the outside, so a
//! timed-out attempt keeps running detached until it finishes on its own; its
//! result is dropped because nobody is listening any more.

use std::fmt::Display;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::trace;

use crate::error::PolicyError;

const ATTEMPT_THREAD_NAME: &str = "stockwatch-attempt";

/// Run one attempt of `operation`, bounded by `timeout`.
pub(crate) fn run_attempt<T, E, F>(
    operation: &Arc<F>,
    timeout: Duration,
    attempt: u32,
) -> Result<T, PolicyError>
where
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
    T: Send + 'static,
    E: Display + 'static,
{
    // Capacity 1: a late sender never blocks after the receiver is gone.
    let (tx, rx) = mpsc::sync_channel::<Result<T, String>>(1);
    let operation = Arc::clone(operation);

    thread::Builder::new()
        .name(format!("{ATTEMPT_THREAD_NAME}-{attempt}"))
        .spawn(move || {
            let outcome = operation().map_err(|e| e.to_string());
            if tx.send(outcome).is_err() {
                trace!(attempt, "attempt finished after its deadline; result discarded");
            }
        })
        .map_err(|e| PolicyError::operation(format!("failed to spawn attempt thread: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(msg)) => Err(PolicyError::OperationFailure(msg)),
        Err(RecvTimeoutError::Timeout) => Err(PolicyError::TimedOut { after: timeout }),
        // The sender was dropped without sending: the operation panicked.
        Err(RecvTimeoutError::Disconnected) => {
            Err(PolicyError::operation("operation panicked"))
        }
    }
}
