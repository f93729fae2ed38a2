//! ATCF Processor Library
//!
//! A Rust library for decoding ATCF (Automated Tropical Cyclone
//! Forecasting) best-track and forecast records into structured,
//! serializable data.
//!
//! This library provides tools for:
//! - Decoding the fixed 45-field comma-delimited record layout
//! - Translating development level, sub-region and depth codes
//! - Extracting genesis and invest/transition/dissipation lineage from
//!   user-defined field pairs
//! - Rolling up the latest lineage facts across a whole track file
//! - Rendering the decoded file as JSON
//!
//! ```rust
//! use atcf_processor::AtcfFile;
//!
//! let file = AtcfFile::parse("WP, 01, 2015010200, , BEST, 0, 89N, 1394E, 35, 1000, TS");
//! assert_eq!(file.len(), 1);
//! assert_eq!(file.records()[0].lat, Some(8.9));
//! assert_eq!(file.records()[0].level.as_deref(), Some("tropical storm"));
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use aggregator::parse_file;
pub use config::AtcfConfig;
pub use decoder::decode_record;
pub use error::{AtcfError, Result};
pub use models::{AtcfFile, LineageTransition, ParseStats, RadiusSet, Record, Rollup, StormCode};
