//! Tracing and request correlation (shared setup).

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init("info");
}

/// Subscriber setup and request spans.
pub mod tracing;

pub use self::tracing::{request_span, REQUEST_ID_HEADER};
