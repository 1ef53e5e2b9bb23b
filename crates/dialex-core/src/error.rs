//! Error types for dialex-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading or writing dictionary entries.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The dump could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path of the dump.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The dump exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    TooLarge {
        /// Path of the dump.
        path: Utf8PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// JSON entry data was malformed (including entries without a headword).
    #[error("invalid JSON entries: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML entry data was malformed.
    #[error("invalid YAML entries: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias using [`SourceError`].
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur when searching headwords.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The search prefix was empty or whitespace.
    #[error("search prefix must not be empty")]
    EmptyQuery,

    /// The escaped prefix could not be compiled.
    #[error("invalid search pattern: {0}")]
    Pattern(String),
}

/// Result type alias using [`SearchError`].
pub type SearchResult<T> = Result<T, SearchError>;
