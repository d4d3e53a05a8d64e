use reqwest_tracing::{SpanBackendWithUrl, TracingMiddleware};

/// Returns a new tracing middleware for use with reqwest_middleware.
/// Every outgoing request gets its own span, with the full URL recorded into
/// `http.url` next to method and status.
pub fn tracing_middleware() -> TracingMiddleware<SpanBackendWithUrl> {
    TracingMiddleware::<SpanBackendWithUrl>::new()
}
