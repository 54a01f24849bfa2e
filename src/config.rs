//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;
use strum::{Display, EnumString};

use crate::error::AppError;

/// Runtime mode. Development additionally serves the interactive docs UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    /// Local development.
    #[serde(alias = "Development", alias = "dev")]
    #[strum(to_string = "development", serialize = "dev")]
    Development,
    /// Anything deployed.
    #[serde(alias = "Production", alias = "prod")]
    #[strum(to_string = "production", serialize = "prod")]
    #[default]
    Production,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Runtime mode.
    #[serde(default)]
    pub app_env: Environment,

    /// Name used in documentation titles.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_app_name() -> String {
    "endpoint-catalog".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: Environment::default(),
            app_name: default_app_name(),
            host: default_host(),
            port: default_port(),
            rust_log: default_log_level(),
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
    pub fn validate(&self) -> Result<(), AppError> {
        if self.app_name.trim().is_empty() {
            return Err(AppError::InvalidConfig("APP_NAME must not be empty".to_string()));
        }

        if self.host.parse::<IpAddr>().is_err() {
            return Err(AppError::InvalidConfig(format!(
                "HOST must be an IP address, got {:?}",
                self.host
            )));
        }

        Ok(())
    }

    /// Socket address to bind the HTTP server to.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| AppError::InvalidConfig(format!("invalid HOST {:?}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Tracing filter directive. Verbose mode forces debug output for this crate.
    pub fn log_directive(&self, verbose_override: bool) -> String {
        if self.verbose || verbose_override {
            format!("endpoint_catalog=debug,{}", self.rust_log)
        } else {
            self.rust_log.clone()
        }
    }

    /// Whether the interactive documentation UI should be served.
    pub fn is_development(&self) -> bool {
        self.app_env == Environment::Development
    }
}
