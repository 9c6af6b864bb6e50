//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Statement providers.
    pub sources: SourcesConfig,
    /// Normalization settings.
    #[serde(default)]
    pub normalization: NormalizationConfig,
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
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Both statement providers.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Hierarchical (row/column tree) provider.
    pub tree: SourceConfig,
    /// Flat (period array) provider.
    pub flat: SourceConfig,
}

/// One statement provider.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL or local file path of the raw JSON document.
    pub location: String,
    /// Company the normalized periods are saved under.
    pub company_name: String,
    /// Company id stamped on every normalized period.
    pub company_id: i64,
}

/// Normalization settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizationConfig {
    /// Group label for tree rows that have no group ancestor.
    #[serde(default = "default_group")]
    pub default_group: String,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            default_group: default_group(),
        }
    }
}

fn default_group() -> String {
    "Income".to_string()
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
            .add_source(config::Environment::with_prefix("FINSYNC").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
