//! Application configuration loaded from environment variables.

use serde::Deserialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::ArbiError;

/// Supported log output formats.
pub const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port for the calculator API.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format: pretty or json.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            rust_log: default_log_level(),
            log_format: default_log_format(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ArbiError> {
        if self.port == 0 {
            return Err(ArbiError::InvalidConfig("PORT must be non-zero".to_string()));
        }

        if !LOG_FORMATS.contains(&self.log_format_lower().as_str()) {
            return Err(ArbiError::InvalidConfig(format!(
                "LOG_FORMAT must be one of {:?}, got {:?}",
                LOG_FORMATS, self.log_format
            )));
        }

        Ok(())
    }

    /// Log format, lowercased.
    pub fn log_format_lower(&self) -> String {
        self.log_format.to_lowercase()
    }

    /// Filter directive to use when `RUST_LOG` is not parseable.
    pub fn filter_directive(&self) -> String {
        if self.verbose {
            "arbi=debug,info".to_string()
        } else {
            self.rust_log.clone()
        }
    }

    /// Initialize the tracing subscriber. Logs go to stderr so command
    /// output on stdout stays clean.
    pub fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new(self.filter_directive())
        } else {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.filter_directive()))
        };

        let registry = tracing_subscriber::registry().with(filter);
        if self.log_format_lower() == "json" {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
