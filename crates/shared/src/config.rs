//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Seed data configuration.
    #[serde(default)]
    pub seed: SeedConfig,
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

/// Seed data configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Whether to load the demo accounts into an empty store at startup.
    #[serde(default = "default_seed_demo")]
    pub demo: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            demo: default_seed_demo(),
        }
    }
}

fn default_seed_demo() -> bool {
    true
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
            .add_source(config::Environment::with_prefix("TELLER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
