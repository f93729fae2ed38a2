//! Coded-value translation for development level, sub-region and depth
//!
//! Lookups are case-insensitive. A code missing from its table is passed
//! through unchanged.

use crate::constants::{DEPTHS, DEVELOPMENT_LEVELS, SUBREGIONS};

/// Translate a code through `table`, returning the input when unknown
fn translate(table: &[(&str, &'static str)], code: &str) -> String {
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(code))
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| code.to_string())
}

/// `TS` -> "tropical storm"
pub fn development_level(code: &str) -> String {
    translate(DEVELOPMENT_LEVELS, code)
}

/// `W` -> "Western Pacific"
pub fn sub_region(code: &str) -> String {
    translate(SUBREGIONS, code)
}

/// `D` -> "Deep"
pub fn depth(code: &str) -> String {
    translate(DEPTHS, code)
}
