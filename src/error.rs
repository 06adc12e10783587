//! Error types for the extraction engine

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while obtaining document text or loading configuration.
///
/// Per-document variants never escape a batch: the parser turns them into an
/// `INVALID DOCUMENT` record.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document bytes are not UTF-8 text
    #[error("{filename} is not UTF-8 text (invalid byte at offset {offset})")]
    Encoding { filename: String, offset: usize },

    /// Document is in a format this extractor does not render
    #[error("{filename}: {format} documents must be converted to text first")]
    Unsupported {
        filename: String,
        format: &'static str,
    },

    /// Anchor catalog failed validation
    #[error("invalid anchor catalog: {0}")]
    Catalog(String),

    /// Configuration file could not be parsed
    #[error("cannot parse config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
