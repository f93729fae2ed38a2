//! Positional field access and scalar parsers for ATCF lines
//!
//! Every accessor returns `None` for a field that is past the end of the
//! line, empty, or unparseable. Nothing here fails.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::constants::{ATCF_DATE_DIGITS, FIELD_SEPARATOR_PATTERN};
use crate::models::RadiusSet;

/// Comma with optional surrounding whitespace.
static FIELD_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FIELD_SEPARATOR_PATTERN).expect("valid regex"));

/// Positional fields of one ATCF line
#[derive(Debug, Clone)]
pub struct FieldList<'a> {
    fields: Vec<&'a str>,
}

impl<'a> FieldList<'a> {
    /// Split a line on commas, trimming the whitespace around each one
    pub fn split(line: &'a str) -> Self {
        let line = line.trim();
        let fields = if line.is_empty() {
            Vec::new()
        } else {
            FIELD_SEPARATOR_RE.split(line).collect()
        };
        Self { fields }
    }

    /// Number of fields present on the line
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw text at `index`, absent past the end of the line or when empty
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields
            .get(index)
            .copied()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Owned text at `index`
    pub fn string(&self, index: usize) -> Option<String> {
        self.get(index).map(str::to_string)
    }

    /// Integer at `index`
    pub fn int(&self, index: usize) -> Option<i32> {
        self.get(index).and_then(parse_int)
    }

    /// Radius set from six consecutive fields: threshold, code, NE, SE, SW, NW
    pub fn radius_set(&self, start: usize) -> RadiusSet {
        RadiusSet {
            rad: self.int(start),
            code: self.string(start + 1),
            ne: self.int(start + 2),
            se: self.int(start + 3),
            sw: self.int(start + 4),
            nw: self.int(start + 5),
        }
    }
}

/// Parse a signed integer, tolerating leading zeros (`"008"`)
pub fn parse_int(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok()
}

/// Parse a `YYYYMMDDHH` synoptic time as an hour-truncated UTC instant
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.len() != ATCF_DATE_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        debug!("Ignoring malformed ATCF timestamp '{}'", value);
        return None;
    }

    let year = value[0..4].parse::<i32>().ok()?;
    let month = value[4..6].parse::<u32>().ok()?;
    let day = value[6..8].parse::<u32>().ok()?;
    let hour = value[8..10].parse::<u32>().ok()?;

    let timestamp = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .map(|naive| naive.and_utc());

    if timestamp.is_none() {
        debug!("ATCF timestamp '{}' is not a calendar hour", value);
    }
    timestamp
}

/// Parse a tenths-of-degree coordinate with a hemisphere suffix
///
/// `"89N"` is 8.9 and `"394W"` is -39.4. The value is negated when the
/// suffix matches `negative` (`'S'` for latitude, `'W'` for longitude).
pub fn parse_coordinate(value: &str, negative: char) -> Option<f64> {
    let value = value.trim();
    let (magnitude, hemisphere) = match value.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&value[..value.len() - 1], Some(c)),
        _ => (value, None),
    };

    let tenths = parse_int(magnitude)?;
    if tenths == 0 {
        return Some(0.0);
    }

    let degrees = f64::from(tenths) / 10.0;
    if hemisphere.is_some_and(|c| c.eq_ignore_ascii_case(&negative)) {
        Some(-degrees)
    } else {
        Some(degrees)
    }
}
