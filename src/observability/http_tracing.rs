//! # HTTP Request Tracing Middleware
//!
//! Axum middleware that runs each request inside a `http_request` span with a
//! generated request id, and records request count and latency.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::Instrument;

/// Wrap the request in a span and log its completion.
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %uuid::Uuid::new_v4(),
    );

    async move {
        let start = Instant::now();
        let response = next.run(request).await;
        let status = response.status().as_u16();
        let elapsed = start.elapsed();

        tracing::info!(status_code = status, elapsed_ms = elapsed.as_millis() as u64, "Request completed");
        super::metrics::record_http_request(&method, &path, status, elapsed.as_secs_f64());

        response
    }
    .instrument(span)
    .await
}
