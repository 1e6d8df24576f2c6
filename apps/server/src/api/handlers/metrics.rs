//! Metrics endpoint handler
//!
//! Exposes Prometheus-compatible metrics for monitoring

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::metrics;
use crate::state::AppState;

/// Handler for /metrics endpoint
/// Returns Prometheus text format metrics
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = &state.db_pool {
        let idle = pool.num_idle() as i64;
        metrics::DB_CONNECTIONS_IDLE.set(idle);
        metrics::DB_CONNECTIONS_ACTIVE.set(i64::from(pool.size()) - idle);
    }

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => {
            buffer.extend_from_slice(
                server_info(env!("CARGO_PKG_VERSION"), state.config.store.as_str()).as_bytes(),
            );

            (
                StatusCode::OK,
                [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
                buffer,
            )
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}

fn server_info(version: &str, store: &str) -> String {
    format!(
        "# HELP marketplace_server_info Server build information\n\
         # TYPE marketplace_server_info gauge\n\
         marketplace_server_info{{version=\"{version}\",store=\"{store}\"}} 1\n"
    )
}
