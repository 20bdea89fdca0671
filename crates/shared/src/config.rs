//! Application configuration management.

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Exchange quote configuration.
    #[serde(default)]
    pub quotes: QuoteConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`postgres://...` or `sqlite:...`).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Apply pending migrations when the server starts.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_run_migrations() -> bool {
    true
}

/// Exchange quote configuration.
///
/// Quotes only feed the read-only balance projection; when disabled or
/// unreachable the projection is simply omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    /// Whether quotes are fetched at all.
    #[serde(default)]
    pub enabled: bool,
    /// URL returning a JSON document that contains the rate.
    #[serde(default)]
    pub url: String,
    /// JSON pointer (RFC 6901) to the rate inside the document, e.g. `/venta`.
    #[serde(default = "default_pointer")]
    pub pointer: String,
    /// Currency the balance is projected into.
    #[serde(default = "default_target_currency")]
    pub currency: Currency,
    /// The source quotes one foreign unit in ledger units; use `1 / rate`.
    #[serde(default)]
    pub invert: bool,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long a fetched quote is reused, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: String::new(),
            pointer: default_pointer(),
            currency: default_target_currency(),
            invert: false,
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_pointer() -> String {
    "/rate".to_string()
}

fn default_target_currency() -> Currency {
    Currency::Usd
}

fn default_timeout_secs() -> u64 {
    3
}

fn default_cache_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
