//! File-level aggregation of decoded ATCF records.
//!
//! Decodes every line of a track file in input order and rolls up the
//! genesis number and the three lineage transitions. A later line that
//! defines a fact overwrites any earlier value, so the rollup reflects the
//! last annotated line in the file.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::constants::LINE_ENDING_PATTERN;
use crate::decoder::decode_record;
use crate::models::AtcfFile;

/// `\r\n`, `\n` or a bare `\r`.
static LINE_ENDING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LINE_ENDING_PATTERN).expect("valid regex"));

/// Decode a complete ATCF file
///
/// Trailing whitespace is dropped before splitting on `\r\n`, `\n` or `\r`,
/// so a final newline does not produce an extra record. Blank lines inside
/// the text decode to empty records, and empty text is a single blank line.
pub fn parse_file(text: &str) -> AtcfFile {
    let mut file = AtcfFile::default();

    for (line_num, line) in LINE_ENDING_RE.split(text.trim_end()).enumerate() {
        let record = decode_record(line);
        if record.has_lineage() {
            debug!("Line {} carries lineage annotations", line_num + 1);
        }
        file.push(record);
    }

    let stats = file.stats();
    info!(
        "Decoded {} ATCF records ({} with lineage annotations)",
        stats.total_records, stats.records_with_lineage
    );

    file
}
