//! Marketplace catalog server
//!
//! HTTP service over a product catalog with:
//! - Filtered product search with pagination and facets
//! - Product CRUD scoped to sellers
//! - Per-user shopping carts
//! - PostgreSQL or in-memory storage
//! - Prometheus metrics and OpenTelemetry tracing

#![allow(
    clippy::large_enum_variant,      // Large enum variants acceptable; boxing may impact performance
)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
