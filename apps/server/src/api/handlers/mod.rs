//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and services, handling:
//! - Request extraction and validation
//! - Service invocation
//! - Response formatting

pub mod carts;
pub mod metrics;
pub mod products;
pub mod search;

pub use carts::*;
pub use metrics::*;
pub use products::*;
pub use search::*;

use crate::{Error, Result};
use axum::{extract::rejection::JsonRejection, Json};
use uuid::Uuid;

/// Parse a path id, naming the parameter in the error.
fn parse_id(raw: &str, name: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::Validation(format!("{name} is not valid")))
}

fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Error::Validation(rejection.body_text()))
}
