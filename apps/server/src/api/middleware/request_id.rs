//! Request ID middleware with OpenTelemetry trace context

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use opentelemetry::trace::TraceContextExt;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::request_context::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Root span and request id for every HTTP request.
///
/// The server always assigns its own `x-request-id`. A client-supplied id that
/// differs is echoed back as `x-correlation-id`. `x-trace-id` carries the
/// OpenTelemetry trace id when tracing is enabled.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %req.uri().path(),
        otel.kind = "server",
        http.response.status_code = tracing::field::Empty,
        catalog.operation = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let span = Span::current();

    let client_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let context = RequestContext::new(Uuid::new_v4().to_string());
    let request_id = context.request_id.clone();
    span.record("request_id", request_id.as_str());
    req.extensions_mut().insert(context.clone());

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    if let Some(operation) = crate::metrics::extract_operation(method.as_str(), &path) {
        span.record("catalog.operation", operation);
    }

    tracing::debug!(method = %method, path = %path, "Incoming request");

    let mut response = next.run(req).await;

    let status = response.status();
    span.record("http.response.status_code", status.as_u16());
    tracing::info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = context.elapsed().as_millis() as u64,
        "Request completed"
    );

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        headers.insert(REQUEST_ID_HEADER, value);
    }

    let trace_id = span.context().span().span_context().trace_id().to_string();
    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        headers.insert(TRACE_ID_HEADER, value);
    }

    if let Some(client_id) = client_id.filter(|id| *id != request_id) {
        if let Ok(value) = HeaderValue::from_str(&client_id) {
            headers.insert(CORRELATION_ID_HEADER, value);
        }
    }

    response
}
