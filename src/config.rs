//! Configuration management for the librarian client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Identity portal endpoint (authentication, borrower QR validation)
#[derive(Debug, Deserialize, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub api_key: String,
    pub origin: String,
    /// Only borrower QR codes issued by this origin are accepted.
    pub qr_origin: String,
}

/// Library catalog endpoint (books, borrowings, returns, reservations)
#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    pub base_url: String,
    pub api_key: String,
    pub origin: String,
    /// Authorization header value for catalog requests, injected from the
    /// environment. Never committed to source.
    pub api_token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// Seconds before the scanner re-arms after a rejected frame.
    pub cooldown_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Timeout for scan-class requests (book scan, return scan).
    pub scan_timeout_seconds: u64,
    /// Timeout for list-class requests (borrowings, reservations, search).
    pub list_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Path of the device-scoped session token file.
    pub store_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub portal: PortalConfig,
    pub library: LibraryConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix MLGCL_)
            .add_source(
                Environment::with_prefix("MLGCL")
                    .separator("_")
                    .try_parsing(true),
            )
            // Credential overrides from dedicated env vars if present
            .set_override_option("portal.api_key", env::var("PORTAL_API_KEY").ok())?
            .set_override_option("library.api_key", env::var("LIBRARY_API_KEY").ok())?
            .set_override_option("library.api_token", env::var("LIBRARY_API_TOKEN").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { cooldown_seconds: 2 }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            scan_timeout_seconds: 3,
            list_timeout_seconds: 10,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: ".mlgcl-session.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scanner_defaults_to_two_second_cooldown() {
        assert_eq!(ScannerConfig::default().cooldown_seconds, 2);
    }

    #[test]
    fn http_defaults_split_scan_and_list_timeouts() {
        let http = HttpConfig::default();
        assert_eq!(http.scan_timeout_seconds, 3);
        assert_eq!(http.list_timeout_seconds, 10);
    }
}
