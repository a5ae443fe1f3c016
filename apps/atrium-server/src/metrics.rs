//! Prometheus metrics for atrium-server.
//!
//! Exposes server metrics in Prometheus format at the `/metrics` endpoint.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics recorder and return a handle for rendering.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Describe metrics for better documentation in /metrics output
    describe_counter!(
        "atrium_http_requests_total",
        "Total number of HTTP requests processed"
    );
    describe_histogram!(
        "atrium_http_request_duration_seconds",
        "Duration of HTTP requests in seconds"
    );

    handle
}

/// Middleware that records a counter and a latency histogram per route.
///
/// Labels use the matched route template (`/groups/:title`), not the raw
/// request path, to keep cardinality bounded.
pub async fn track_http(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let status = response.status().as_u16().to_string();
    counter!(
        "atrium_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "atrium_http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(elapsed.as_secs_f64());

    response
}
