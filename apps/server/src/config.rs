//! Server configuration
//!
//! Values are layered, later sources overriding earlier ones:
//! 1. built-in defaults
//! 2. a TOML file (`config/default.toml` if present, or an explicit `--config` path)
//! 3. environment variables prefixed `MARKETPLACE__`, nested with `__`
//!    (e.g. `MARKETPLACE__SERVER__PORT=8080`, `MARKETPLACE__STORE=memory`)
//!
//! A `.env` file is loaded first if present. `DATABASE_URL` is honored when
//! `database.url` is not set.

use anyhow::Context;
use marketplace_search::PageLimits;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

const ENV_PREFIX: &str = "MARKETPLACE";
const DEFAULT_CONFIG_FILE: &str = "config/default";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub store: StoreBackend,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. Empty disables CORS headers.
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            max_request_body_size: 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_min_size: 1,
            pool_max_size: 10,
            pool_timeout_seconds: 30,
            run_migrations: true,
        }
    }
}

/// Which product store backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Volatile store, for local development and tests.
    Memory,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_page_size: u64,
    /// Optional cap on requested page sizes. Unset honors any size.
    pub max_page_size: Option<u64>,
    /// Abandon a search after this many seconds. 0 disables the limit.
    pub timeout_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let limits = PageLimits::default();
        Self {
            default_page_size: limits.default_page_size,
            max_page_size: limits.max_page_size,
            timeout_seconds: 30,
        }
    }
}

impl SearchConfig {
    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// `daily`, `hourly`, `minutely` or `never`
    pub file_rotation: String,
    pub opentelemetry_enabled: bool,
    pub otlp_endpoint: String,
    pub otlp_timeout_seconds: u64,
    pub trace_sample_ratio: f64,
    pub service_name: String,
    pub service_version: Option<String>,
    pub deployment_environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "marketplace".to_string(),
            file_rotation: "daily".to_string(),
            opentelemetry_enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            otlp_timeout_seconds: 10,
            trace_sample_ratio: 1.0,
            service_name: "marketplace-server".to_string(),
            service_version: None,
            deployment_environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load from defaults, `config/default.toml` (optional) and the environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Load with an explicit config file, which must exist when given.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        let mut config = Self::build(path, None)?;

        if config.database.url.is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                config.database.url = url;
            }
        }

        Ok(config)
    }

    /// Layer the sources. `env` replaces the process environment when given.
    fn build(path: Option<&Path>, env: Option<config::Map<String, String>>) -> anyhow::Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialize default configuration")?;

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .source(env);

        config::Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(environment)
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Reject inconsistent settings before anything is started.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.server.max_request_body_size == 0 {
            return Err("server.max_request_body_size must be non-zero".to_string());
        }

        if self.store == StoreBackend::Postgres {
            if self.database.url.trim().is_empty() {
                return Err(
                    "database.url (or DATABASE_URL) is required for the postgres store".to_string(),
                );
            }
            if self.database.pool_max_size == 0 {
                return Err("database.pool_max_size must be non-zero".to_string());
            }
            if self.database.pool_min_size > self.database.pool_max_size {
                return Err(format!(
                    "database.pool_min_size ({}) exceeds database.pool_max_size ({})",
                    self.database.pool_min_size, self.database.pool_max_size
                ));
            }
        }

        if self.search.default_page_size == 0 || self.search.max_page_size == Some(0) {
            return Err("search page sizes must be non-zero".to_string());
        }
        if let Some(max_page_size) = self.search.max_page_size {
            if self.search.default_page_size > max_page_size {
                return Err(format!(
                    "search.default_page_size ({}) exceeds search.max_page_size ({})",
                    self.search.default_page_size, max_page_size
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.logging.trace_sample_ratio) {
            return Err("logging.trace_sample_ratio must be within [0, 1]".to_string());
        }
        if !matches!(
            self.logging.file_rotation.as_str(),
            "daily" | "hourly" | "minutely" | "never"
        ) {
            return Err(format!(
                "logging.file_rotation must be daily, hourly, minutely or never (got {:?})",
                self.logging.file_rotation
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| {
                format!(
                    "Invalid listen address {}:{}",
                    self.server.host, self.server.port
                )
            })
    }
}
