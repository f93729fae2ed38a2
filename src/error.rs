//! Error handling for ATCF processing operations.
//!
//! The record decoder and file aggregator are total and never fail. These
//! errors belong to the boundary: reading input, encoding output and
//! validating configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtcfError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is not valid UTF-8 text: {}", path.display())]
    InvalidEncoding { path: PathBuf },

    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AtcfError {
    /// Create an I/O error bound to the path being read or written
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtcfError>;
