//! Common error types for Tandem

use thiserror::Error;

/// Common result type for Tandem operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the player and its tooling
#[derive(Error, Debug)]
pub enum Error {
    /// TOML configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
