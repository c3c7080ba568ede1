//! Process-wide logging setup.

/// Tracing subscriber configuration.
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide tracing/logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}
