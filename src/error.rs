use thiserror::Error;

/// Errors that can occur while serving, seeding or browsing the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Underlying SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The shared connection lock was poisoned by a panicking request
    #[error("Database connection is unavailable: {0}")]
    ConnectionPoisoned(String),

    /// Request parameters could not be parsed
    #[error("Invalid request: {0}")]
    Validation(String),

    /// No recipe has the requested slug
    #[error("Recipe '{0}' not found")]
    NotFound(String),

    /// Seed data was rejected before or during insertion
    #[error("Seeding failed: {0}")]
    Seed(String),

    /// Failed to read seed data or bind a socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in seed data or an API response
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The frontend could not reach the catalog API
    #[error("Failed to reach catalog API: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog API answered with an unexpected status
    #[error("Catalog API returned status {0}")]
    UpstreamStatus(u16),

    /// A URL could not be built from configuration
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
