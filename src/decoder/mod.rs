//! ATCF record decoder
//!
//! Turns one comma-delimited ATCF line into a [`Record`](crate::models::Record).
//! The decoder is total: short lines, empty fields and malformed tokens all
//! decode to absent values instead of errors.
//!
//! ## Architecture
//!
//! - [`fields`] - Positional field access and scalar parsers
//! - [`codes`] - Development level, sub-region and depth tables
//! - [`lineage`] - Storm code pair tokenizer for lineage annotations
//! - [`record`] - Assembly of a full record from one line

pub mod codes;
pub mod fields;
pub mod lineage;
pub mod record;

pub use record::decode_record;
