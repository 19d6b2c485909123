//! Server configuration
//!
//! # Environment variables
//!
//! All configuration items can be overridden via environment variables:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HTTP_PORT | 3000 | HTTP API port |
//! | RECORD_STORE_URL | http://localhost:4010 | Record store base URL |
//! | RECORD_STORE_TOKEN | (unset) | Bearer token for the record store |
//! | FETCH_TIMEOUT_SECS | 10 | Per-request timeout against the record store |
//! | LOG_LEVEL | info | Log level |
//! | LOG_DIR | (unset) | Directory for daily-rolling log files |
//! | ENVIRONMENT | development | Runtime environment |

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Record store base URL
    pub record_store_url: String,
    /// Bearer token for the record store, if required
    pub record_store_token: Option<String>,
    /// Per-request timeout against the record store (seconds)
    pub fetch_timeout_secs: u64,
    /// Log level
    pub log_level: String,
    /// Directory for daily-rolling log files
    pub log_dir: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            record_store_url: std::env::var("RECORD_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:4010".into()),
            record_store_token: std::env::var("RECORD_STORE_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Is this a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
