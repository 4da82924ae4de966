//! Tracing/logging (shared setup).

/// Subscriber configuration (filters, formats).
pub mod subscriber;

pub use subscriber::{LogFormat, ParseLogFormatError};

/// Initialize process-wide tracing with the given output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    subscriber::init(format);
}
