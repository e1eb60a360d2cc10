//! Configuration module for the employee portal.
//!
//! Loads configuration from built-in defaults, YAML files and environment variables.

use config::{
    builder::DefaultState, Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File,
};
use serde::Deserialize;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    /// First port tried; successive ports are tried while this one is taken.
    pub port: u16,
    /// Single origin allowed by CORS.
    pub cors_origin: String,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string. Required; there is no default.
    pub url: String,
    /// Fixed delay between startup connection attempts.
    pub retry_delay_secs: u64,
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. `DATABASE_URL`, `PORT`, `CORS_ORIGIN`
    /// 2. Environment variables (PORTAL__SECTION__KEY)
    /// 3. config/local.yaml (if exists)
    /// 4. config/default.yaml (if exists)
    /// 5. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with PORTAL prefix
            .add_source(
                Environment::with_prefix("PORTAL")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env_value("DATABASE_URL"))?
            .set_override_option("server.port", port_override(env_value("PORT")))?
            .set_override_option("server.cors_origin", env_value("CORS_ORIGIN"))?;

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;

        if config.database.url.trim().is_empty() {
            return Err(ConfigError::Message(
                "database.url must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ConfigLoader::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5001_i64)?
            .set_default("server.cors_origin", "http://localhost:3000")?
            .set_default("database.retry_delay_secs", 5_i64)?
            .set_default("database.max_connections", 5_i64)
    }
}

/// A set, non-blank environment variable.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `PORT` that is not a usable port number is ignored.
fn port_override(raw: Option<String>) -> Option<i64> {
    let raw = raw?;
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Some(i64::from(port)),
        _ => {
            tracing::warn!(port = %raw, "Ignoring invalid PORT");
            None
        }
    }
}
