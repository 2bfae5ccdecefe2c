//! errors.rs - Custom error types for the textmask-core library.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error types surfaced by `textmask-core`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TextmaskError {
    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("Text sanitization failed for language {language}: {source}")]
    Sanitization {
        language: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to compile masking rule '{0}': {1}")]
    RuleCompilation(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
