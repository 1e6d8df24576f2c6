//! Error types for the marketplace server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use marketplace_search::{SearchError, StoreError};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid product: {0}")]
    InvalidPayload(#[from] validator::ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// HTTP status, stable error code, and whether details may reach the client.
    fn classify(&self) -> (StatusCode, &'static str, bool) {
        match self {
            Error::Validation(_) | Error::InvalidPayload(_) => {
                (StatusCode::BAD_REQUEST, "validation", true)
            }
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", true),
            Error::Store(e) | Error::Search(SearchError::Retrieval(e)) => classify_store(e),
            Error::Search(SearchError::Cancelled) => {
                (StatusCode::SERVICE_UNAVAILABLE, "cancelled", true)
            }
            Error::Database(_) | Error::Migration(_) | Error::Internal(_) | Error::Other(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", false)
            }
        }
    }
}

fn classify_store(error: &StoreError) -> (StatusCode, &'static str, bool) {
    match error {
        StoreError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", true),
        StoreError::Conflict(_) => (StatusCode::CONFLICT, "conflict", true),
        StoreError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", false),
        StoreError::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", false),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code, expose) = self.classify();

        let message = if expose {
            self.to_string()
        } else {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        };

        let mut body = json!({
            "message": message,
            "error": code,
        });
        if let Error::InvalidPayload(errors) = &self {
            body["fields"] = json!(errors
                .field_errors()
                .keys()
                .map(|k| k.to_string())
                .collect::<Vec<_>>());
        }

        (status, Json(body)).into_response()
    }
}
