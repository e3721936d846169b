//! Error types for the fallible edges of the engine (configuration loading)

use std::path::PathBuf;

/// Errors raised while loading or validating engine configuration.
///
/// Placement and anchor operations themselves never fail; a missing
/// precondition is an idle state, not an error.
#[derive(Debug, thiserror::Error)]
pub enum PlacekitError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration syntax: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, PlacekitError>;
