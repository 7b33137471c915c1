use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main catalog configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON API server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// SQLite database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Browsing frontend settings
    #[serde(default)]
    pub frontend: FrontendConfig,
    /// Seeder settings
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Configuration for the JSON API server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Externally visible base URL, used for pagination links
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_server_port(),
            public_url: default_public_url(),
        }
    }
}

/// Configuration for the SQLite store
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file, or `:memory:`
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Configuration for the browsing frontend
#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind
    #[serde(default = "default_frontend_port")]
    pub port: u16,
    /// Base URL of the catalog API (without the `/api` suffix)
    #[serde(default = "default_public_url")]
    pub api_url: String,
    /// Request timeout in seconds for API calls
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_frontend_port(),
            api_url: default_public_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Configuration for the seeder
#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// JSON file holding the sample recipes
    #[serde(default = "default_seed_source")]
    pub source: PathBuf,
    /// Author used for records that do not carry one
    #[serde(default = "default_author_email")]
    pub default_author_email: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            source: default_seed_source(),
            default_author_email: default_author_email(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_frontend_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_database_path() -> String {
    "recipes.sqlite".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_seed_source() -> PathBuf {
    PathBuf::from("data/recipes.json")
}

fn default_author_email() -> String {
    "kitchen@example.com".to_string()
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPES__ prefix
/// 2. The named config file (any extension `config` understands, optional)
/// 3. Default values
///
/// Environment variable format: RECIPES__SERVER__PORT
pub fn load_config(file: &str) -> Result<CatalogConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix("RECIPES")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
