//! Metrics middleware - HTTP and catalog operation metrics

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{self, sanitize_path};

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let route = sanitize_path(&path);

    let in_flight = metrics::HTTP_REQUESTS_IN_FLIGHT.with_label_values(&[method.as_str(), route]);
    in_flight.inc();

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();
    let status_label = status.to_string();

    metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), route, status_label.as_str()])
        .inc();
    metrics::HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method.as_str(), route])
        .observe(duration);

    if let Some(size) = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok())
    {
        metrics::HTTP_RESPONSE_SIZE_BYTES
            .with_label_values(&[method.as_str(), route, status_label.as_str()])
            .observe(size);
    }

    if let Some(operation) = metrics::extract_operation(&method, &path) {
        metrics::CATALOG_OPERATIONS_TOTAL
            .with_label_values(&[operation, metrics::status_class(status)])
            .inc();
    }

    in_flight.dec();
    response
}
