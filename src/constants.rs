//! Application constants for the ATCF processor
//!
//! This module contains the fixed record layout, lineage keywords and the
//! coded-value translation tables used throughout the decoder.

// =============================================================================
// Record Layout
// =============================================================================

/// Zero-based field positions of the 45-field ATCF layout
pub mod fields {
    pub const BASIN: usize = 0;
    pub const CYCLONE_NUMBER: usize = 1;
    pub const DATE_TIME: usize = 2;
    pub const TECHNIQUE_NUMBER: usize = 3;
    pub const TECHNIQUE: usize = 4;
    pub const TAU: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
    pub const MAX_SUSTAINED_WIND: usize = 8;
    pub const MIN_SEA_LEVEL_PRESSURE: usize = 9;
    pub const DEVELOPMENT_LEVEL: usize = 10;

    /// First of the six wind radius fields (RAD, WINDCODE, RAD1-4)
    pub const WIND_RADIUS_START: usize = 11;

    pub const OUTER_ISOBAR_PRESSURE: usize = 17;
    pub const OUTER_ISOBAR_RADIUS: usize = 18;
    pub const MAX_WIND_RADIUS: usize = 19;
    pub const GUSTS: usize = 20;
    pub const EYE_DIAMETER: usize = 21;
    pub const SUBREGION: usize = 22;
    pub const MAX_SEAS: usize = 23;
    pub const FORECASTER: usize = 24;
    pub const DIRECTION: usize = 25;
    pub const SPEED: usize = 26;
    pub const STORM_NAME: usize = 27;
    pub const DEPTH: usize = 28;

    /// First of the six sea height radius fields (SEAS, SEASCODE, SEAS1-4)
    pub const SEA_RADIUS_START: usize = 29;

    /// First user-defined (name, value) pair
    pub const USER_DEFINED_START: usize = 35;

    /// Maximum number of user-defined pairs on one line
    pub const USER_DEFINED_PAIRS: usize = 5;
}

/// Number of digits in a DATE_TIME field
pub const ATCF_DATE_DIGITS: usize = 10;

/// Separator pattern between positional fields
pub const FIELD_SEPARATOR_PATTERN: &str = r"\s*,\s*";

/// Line endings accepted between records
pub const LINE_ENDING_PATTERN: &str = r"\r\n|\n|\r";

/// Latitude used when the field is missing
pub const DEFAULT_LATITUDE: &str = "0N";

/// Longitude used when the field is missing
pub const DEFAULT_LONGITUDE: &str = "0E";

/// Technique name of best-track fixes
pub const BEST_TRACK_TECHNIQUE: &str = "BEST";

// =============================================================================
// User-Defined Lineage Keywords
// =============================================================================

/// User-defined field names carrying lineage annotations
pub mod lineage {
    /// Invest spawned from a genesis area
    pub const SPAWN_INVEST: &str = "SPAWNINVEST";

    /// Invest transitioned into a numbered cyclone
    pub const TRANSITIONED: &str = "TRANSITIONED";

    /// Cyclone dissipated back to an invest area
    pub const DISSIPATED: &str = "DISSIPATED";

    /// Genesis sequence number
    pub const GENESIS_NUMBER: &str = "genesis-num";

    /// Optional literal joining the two storm codes
    pub const CODE_JOINER: &str = "to";

    /// Character widths of a storm code: basin, cyclone id, year
    pub const BASIN_WIDTH: usize = 2;
    pub const ID_WIDTH: usize = 2;
    pub const YEAR_WIDTH: usize = 4;
}

// =============================================================================
// Coded-Value Tables
// =============================================================================

/// Development level codes (TY field)
pub const DEVELOPMENT_LEVELS: &[(&str, &str)] = &[
    ("DB", "disturbance"),
    ("TD", "tropical depression"),
    ("TS", "tropical storm"),
    ("TY", "typhoon"),
    ("ST", "super typhoon"),
    ("TC", "tropical cyclone"),
    ("HU", "hurricane"),
    ("SD", "subtropical depression"),
    ("SS", "subtropical storm"),
    ("EX", "extratropical system"),
    ("PT", "post tropical"),
    ("IN", "inland"),
    ("DS", "dissipating"),
    ("LO", "low"),
    ("WV", "tropical wave"),
    ("ET", "extrapolated"),
    ("MD", "monsoon depression"),
    ("XX", "unknown"),
];

/// Sub-region codes (SUBREGION field)
pub const SUBREGIONS: &[(&str, &str)] = &[
    ("A", "Arabian Sea"),
    ("B", "Bay of Bengal"),
    ("C", "Central Pacific"),
    ("E", "Eastern Pacific"),
    ("L", "Atlantic"),
    ("P", "South Pacific (135E–120W)"),
    ("Q", "South Atlantic"),
    ("S", "South IO (20E–135E)"),
    ("W", "Western Pacific"),
];

/// System depth codes (DEPTH field)
pub const DEPTHS: &[(&str, &str)] = &[
    ("D", "Deep"),
    ("M", "Medium"),
    ("S", "Shallow"),
    ("X", "Unknown"),
];
