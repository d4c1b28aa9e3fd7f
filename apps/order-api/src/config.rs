//! Environment configuration.
//!
//! - `DATABASE_URL`: PostgreSQL connection string. When set, the service
//!   runs against Postgres; when absent, against the local JSON document.
//! - `PORT`: HTTP listen port (default: 4000).
//! - `ORDERS_DATA_FILE`: path of the fallback document (default: `db.json`
//!   in the working directory).

use std::path::PathBuf;

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 4000;

/// Default fallback document path.
pub const DEFAULT_DATA_FILE: &str = "db.json";

/// Parsed service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string, if configured.
    pub database_url: Option<String>,
    /// HTTP listen port.
    pub port: u16,
    /// Path of the JSON fallback document.
    pub data_file: PathBuf,
}

impl AppConfig {
    /// Read configuration from environment variables, applying defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_file = std::env::var("ORDERS_DATA_FILE")
            .ok()
            .filter(|p| !p.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from);

        Self {
            database_url,
            port,
            data_file,
        }
    }

    /// Log the effective configuration without leaking the connection
    /// string.
    pub fn log(&self) {
        tracing::info!(
            port = self.port,
            database_configured = self.database_url.is_some(),
            data_file = %self.data_file.display(),
            "Configuration loaded"
        );
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_fallback_store() {
        let config = AppConfig::default();
        assert_eq!(config.port, 4000);
        assert!(config.database_url.is_none());
        assert_eq!(config.data_file, PathBuf::from("db.json"));
    }
}
