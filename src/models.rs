//! Core data structures for decoded ATCF tracks.
//!
//! Defines storm identifiers, lineage transitions, radius observations,
//! the per-line [`Record`] and the file-level [`AtcfFile`] with its rollup
//! of lineage facts. Serialized field names follow the downstream JSON
//! layout (`stormNo`, `maxSusWind`, `genNo`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::BEST_TRACK_TECHNIQUE;

// =============================================================================
// Lineage Structures
// =============================================================================

/// Compact storm identifier such as `wp712015`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StormCode {
    /// Two-character basin code
    #[serde(rename = "ba")]
    pub basin: Option<String>,

    /// Two-character cyclone number
    pub id: Option<String>,

    /// Four-digit year
    #[serde(rename = "yr")]
    pub year: Option<String>,
}

impl StormCode {
    pub fn new(basin: impl Into<String>, id: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            basin: Some(basin.into()),
            id: Some(id.into()),
            year: Some(year.into()),
        }
    }
}

impl fmt::Display for StormCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.basin.as_deref().unwrap_or("??"),
            self.id.as_deref().unwrap_or("??"),
            self.year.as_deref().unwrap_or("????")
        )
    }
}

/// Named event moving a system from one storm code to another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageTransition {
    pub from: Option<StormCode>,
    pub to: Option<StormCode>,
}

impl LineageTransition {
    pub fn new(from: StormCode, to: StormCode) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }
}

impl fmt::Display for LineageTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => write!(f, "{} -> {}", from, to),
            (Some(from), None) => write!(f, "{} -> ?", from),
            (None, Some(to)) => write!(f, "? -> {}", to),
            (None, None) => write!(f, "? -> ?"),
        }
    }
}

// =============================================================================
// Radius Observations
// =============================================================================

/// Wind or sea height radius observation
///
/// `code` distinguishes full circle (`AAA`) from quadrant layouts (`NEQ`).
/// For a full circle only `ne` carries a radius. Values are stored as
/// decoded; consistency with `code` is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusSet {
    /// Threshold (wind in kt, seas in ft)
    pub rad: Option<i32>,
    pub code: Option<String>,
    pub ne: Option<i32>,
    pub se: Option<i32>,
    pub sw: Option<i32>,
    pub nw: Option<i32>,
}

impl RadiusSet {
    /// True when no part of the radius observation was present
    pub fn is_empty(&self) -> bool {
        self.rad.is_none()
            && self.code.is_none()
            && self.ne.is_none()
            && self.se.is_none()
            && self.sw.is_none()
            && self.nw.is_none()
    }
}

// =============================================================================
// Record
// =============================================================================

/// One decoded ATCF fix
///
/// Every scalar is optional: a missing or unparseable field decodes to
/// `None`. Coded fields (`level`, `sub_region`, `depth`) hold the
/// translated label, or the raw code when it is not in the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub basin: Option<String>,
    pub storm_no: Option<i32>,

    /// Synoptic time, truncated to the hour
    pub date: Option<DateTime<Utc>>,

    pub tech_num: Option<i32>,
    pub tech: Option<String>,

    /// Forecast hour offset; negative for hindcast positions
    pub tau: Option<i32>,

    /// Signed decimal degrees, south negative
    pub lat: Option<f64>,

    /// Signed decimal degrees, west negative
    pub lon: Option<f64>,

    pub max_sus_wind: Option<i32>,
    pub min_sea_level_psur: Option<i32>,
    pub level: Option<String>,
    pub wind_rad: RadiusSet,
    pub outer_psur: Option<i32>,
    pub outer_rad: Option<i32>,
    pub max_wind_rad: Option<i32>,
    pub wind_gust: Option<i32>,
    pub eye_dia: Option<i32>,
    pub sub_region: Option<String>,
    pub max_seas: Option<i32>,
    pub forecaster: Option<String>,
    pub dir: Option<i32>,
    pub speed: Option<i32>,
    pub name: Option<String>,
    pub depth: Option<String>,
    pub sea_rad: RadiusSet,

    /// Unrecognized user-defined fields, name to raw value
    pub user_data: BTreeMap<String, String>,

    pub gen_no: Option<i32>,
    pub invest: Option<LineageTransition>,
    #[serde(rename = "trans")]
    pub transitioned: Option<LineageTransition>,
    #[serde(rename = "diss")]
    pub dissipated: Option<LineageTransition>,
}

impl Record {
    /// Decode a single ATCF line
    pub fn parse(line: &str) -> Self {
        crate::decoder::decode_record(line)
    }

    /// True when this line carries any lineage or genesis annotation
    pub fn has_lineage(&self) -> bool {
        self.gen_no.is_some()
            || self.invest.is_some()
            || self.transitioned.is_some()
            || self.dissipated.is_some()
    }

    /// True for best-track fixes
    pub fn is_best_track(&self) -> bool {
        self.tech.as_deref() == Some(BEST_TRACK_TECHNIQUE)
    }
}

// =============================================================================
// File
// =============================================================================

/// A decoded ATCF file: every record in input order plus the lineage
/// rollup taken from the last line defining each fact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtcfFile {
    data: Vec<Record>,
    gen_no: Option<i32>,
    invest: Option<LineageTransition>,
    #[serde(rename = "trans")]
    transitioned: Option<LineageTransition>,
    #[serde(rename = "diss")]
    dissipated: Option<LineageTransition>,
}

impl AtcfFile {
    /// Decode full ATCF file text
    pub fn parse(text: &str) -> Self {
        crate::aggregator::parse_file(text)
    }

    /// Append a record, overwriting each rollup fact the record defines
    pub(crate) fn push(&mut self, record: Record) {
        if let Some(gen_no) = record.gen_no {
            self.gen_no = Some(gen_no);
        }
        if let Some(invest) = &record.invest {
            self.invest = Some(invest.clone());
        }
        if let Some(transitioned) = &record.transitioned {
            self.transitioned = Some(transitioned.clone());
        }
        if let Some(dissipated) = &record.dissipated {
            self.dissipated = Some(dissipated.clone());
        }
        self.data.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn gen_no(&self) -> Option<i32> {
        self.gen_no
    }

    pub fn invest(&self) -> Option<&LineageTransition> {
        self.invest.as_ref()
    }

    pub fn transitioned(&self) -> Option<&LineageTransition> {
        self.transitioned.as_ref()
    }

    pub fn dissipated(&self) -> Option<&LineageTransition> {
        self.dissipated.as_ref()
    }

    /// Best-track fixes in input order
    pub fn best_track(&self) -> impl Iterator<Item = &Record> {
        self.data.iter().filter(|record| record.is_best_track())
    }

    /// Distinct technique names in first-seen order
    pub fn techniques(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for tech in self.data.iter().filter_map(|record| record.tech.as_deref()) {
            if !seen.contains(&tech) {
                seen.push(tech);
            }
        }
        seen
    }

    /// Borrowed view of the four file-level lineage facts
    pub fn rollup(&self) -> Rollup<'_> {
        Rollup {
            gen_no: self.gen_no,
            invest: self.invest.as_ref(),
            transitioned: self.transitioned.as_ref(),
            dissipated: self.dissipated.as_ref(),
        }
    }

    /// Summary counts over the decoded records
    pub fn stats(&self) -> ParseStats {
        let mut stats = ParseStats {
            total_records: self.data.len(),
            ..ParseStats::default()
        };

        for record in &self.data {
            if record.date.is_some() {
                stats.records_with_timestamp += 1;
            }
            if record.lat.is_some() && record.lon.is_some() {
                stats.records_with_position += 1;
            }
            if record.has_lineage() {
                stats.records_with_lineage += 1;
            }
            stats.unrecognized_user_fields += record.user_data.len();
        }

        stats
    }
}

/// File-level lineage facts, serialized with the same names as the file
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rollup<'a> {
    pub gen_no: Option<i32>,
    pub invest: Option<&'a LineageTransition>,
    #[serde(rename = "trans")]
    pub transitioned: Option<&'a LineageTransition>,
    #[serde(rename = "diss")]
    pub dissipated: Option<&'a LineageTransition>,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of lines decoded into records
    pub total_records: usize,

    /// Records whose timestamp decoded
    pub records_with_timestamp: usize,

    /// Records with both latitude and longitude
    pub records_with_position: usize,

    /// Records carrying genesis or lineage annotations
    pub records_with_lineage: usize,

    /// User-defined pairs kept verbatim across all records
    pub unrecognized_user_fields: usize,
}

impl ParseStats {
    /// Share of records with a decoded timestamp, as a percentage
    pub fn timestamp_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.records_with_timestamp as f64 / self.total_records as f64) * 100.0
        }
    }
}
