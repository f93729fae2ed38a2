//! Configuration management and validation.
//!
//! Output and logging settings for turning a decoded ATCF file into JSON.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::{AtcfError, Result};

/// Global configuration for ATCF processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtcfConfig {
    /// Pretty-print the JSON output
    pub pretty: bool,

    /// Emit only the file-level rollup (genNo, invest, trans, diss)
    pub rollup_only: bool,

    /// Destination file; standard output when unset
    pub output_path: Option<PathBuf>,

    /// Default tracing level when RUST_LOG is not set
    pub log_level: String,

    /// Compact log lines without the uptime timer
    pub compact_logs: bool,
}

impl Default for AtcfConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            rollup_only: false,
            output_path: None,
            log_level: "info".to_string(),
            compact_logs: false,
        }
    }
}

impl AtcfConfig {
    /// Write compact single-line JSON
    pub fn with_compact_output(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Emit only the lineage rollup
    pub fn with_rollup_only(mut self) -> Self {
        self.rollup_only = true;
        self
    }

    /// Write output to a file instead of stdout
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the default tracing level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Use compact log lines
    pub fn with_compact_logs(mut self) -> Self {
        self.compact_logs = true;
        self
    }

    /// Check for settings that cannot work together
    pub fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            return Err(AtcfError::configuration("log level must not be empty"));
        }

        if let Some(path) = &self.output_path {
            if path.is_dir() {
                return Err(AtcfError::configuration(format!(
                    "output path {} is a directory",
                    path.display()
                )));
            }
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}
