//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, ServiceError};

/// Log filter installed when verbose logging is requested.
pub const VERBOSE_LOG_FILTER: &str = "car_service=debug,tower_http=debug,info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/swagger-ui/`.
    #[serde(default = "default_swagger_ui_dir")]
    pub swagger_ui_dir: PathBuf,

    // === Store ===
    /// Start with the two fixture cars instead of an empty store.
    #[serde(default)]
    pub seed_fixtures: bool,

    // === Logging ===
    /// Log filter directives (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_swagger_ui_dir() -> PathBuf {
    PathBuf::from("./swagger-ui")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            swagger_ui_dir: default_swagger_ui_dir(),
            seed_fixtures: false,
            rust_log: default_log_level(),
            log_json: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.swagger_ui_dir.as_os_str().is_empty() {
            return Err(ServiceError::InvalidConfig(
                "SWAGGER_UI_DIR must not be empty".to_string(),
            ));
        }

        if let Err(e) = EnvFilter::try_new(&self.rust_log) {
            return Err(ServiceError::InvalidConfig(format!(
                "RUST_LOG is not a valid filter: {}",
                e
            )));
        }

        Ok(())
    }

    /// Log filter to install, honoring `verbose`.
    pub fn log_filter(&self) -> String {
        if self.verbose {
            VERBOSE_LOG_FILTER.to_string()
        } else {
            self.rust_log.clone()
        }
    }
}
