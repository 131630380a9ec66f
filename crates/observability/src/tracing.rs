//! Tracing/logging initialization.
//!
//! JSON lines on stdout, filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Header carrying the per-request correlation id (read if present, always echoed).
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Initialize the global subscriber. `default_directive` applies when
/// `RUST_LOG` is unset or unparsable.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}

/// Span wrapping one HTTP request; every event logged while serving it
/// carries the request id.
pub fn request_span(method: &str, path: &str, request_id: &str) -> ::tracing::Span {
    ::tracing::info_span!("request", %method, %path, request_id = %request_id)
}
