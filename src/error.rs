use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to callers. Malformed markdown is never one of them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found: {name}")]
    MissingInput { name: String },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0}")]
    Render(String),
}
