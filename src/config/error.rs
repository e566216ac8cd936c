//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or holds malformed values.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
}
