//! Decoding of a single ATCF line into a [`Record`]

use std::collections::BTreeMap;
use tracing::debug;

use super::codes;
use super::fields::{FieldList, parse_coordinate, parse_int, parse_timestamp};
use super::lineage::parse_transition;
use crate::constants::lineage::{DISSIPATED, GENESIS_NUMBER, SPAWN_INVEST, TRANSITIONED};
use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE, fields};
use crate::models::{LineageTransition, Record};

/// Decode one ATCF line
///
/// Never fails: missing trailing fields and unparseable values decode to
/// `None`, and an empty line yields a record with every field absent
/// (apart from the default 0N/0E position).
pub fn decode_record(line: &str) -> Record {
    let parts = FieldList::split(line);
    let annotations = UserAnnotations::collect(&parts);

    Record {
        basin: parts.string(fields::BASIN),
        storm_no: parts.int(fields::CYCLONE_NUMBER),
        date: parts.get(fields::DATE_TIME).and_then(parse_timestamp),
        tech_num: parts.int(fields::TECHNIQUE_NUMBER),
        tech: parts.string(fields::TECHNIQUE),
        tau: parts.int(fields::TAU),
        lat: parse_coordinate(
            parts.get(fields::LATITUDE).unwrap_or(DEFAULT_LATITUDE),
            'S',
        ),
        lon: parse_coordinate(
            parts.get(fields::LONGITUDE).unwrap_or(DEFAULT_LONGITUDE),
            'W',
        ),
        max_sus_wind: parts.int(fields::MAX_SUSTAINED_WIND),
        min_sea_level_psur: parts.int(fields::MIN_SEA_LEVEL_PRESSURE),
        level: parts
            .get(fields::DEVELOPMENT_LEVEL)
            .map(codes::development_level),
        wind_rad: parts.radius_set(fields::WIND_RADIUS_START),
        outer_psur: parts.int(fields::OUTER_ISOBAR_PRESSURE),
        outer_rad: parts.int(fields::OUTER_ISOBAR_RADIUS),
        max_wind_rad: parts.int(fields::MAX_WIND_RADIUS),
        wind_gust: parts.int(fields::GUSTS),
        eye_dia: parts.int(fields::EYE_DIAMETER),
        sub_region: parts.get(fields::SUBREGION).map(codes::sub_region),
        max_seas: parts.int(fields::MAX_SEAS),
        forecaster: parts.string(fields::FORECASTER),
        dir: parts.int(fields::DIRECTION),
        speed: parts.int(fields::SPEED),
        name: parts.string(fields::STORM_NAME),
        depth: parts.get(fields::DEPTH).map(codes::depth),
        sea_rad: parts.radius_set(fields::SEA_RADIUS_START),
        user_data: annotations.user_data,
        gen_no: annotations.gen_no,
        invest: annotations.invest,
        transitioned: annotations.transitioned,
        dissipated: annotations.dissipated,
    }
}

/// Lineage facts and leftover pairs gathered from the user-defined fields
#[derive(Debug, Default)]
struct UserAnnotations {
    user_data: BTreeMap<String, String>,
    gen_no: Option<i32>,
    invest: Option<LineageTransition>,
    transitioned: Option<LineageTransition>,
    dissipated: Option<LineageTransition>,
}

impl UserAnnotations {
    fn collect(parts: &FieldList<'_>) -> Self {
        let mut annotations = Self::default();

        for pair in 0..fields::USER_DEFINED_PAIRS {
            let index = fields::USER_DEFINED_START + pair * 2;
            if let (Some(name), Some(value)) = (parts.get(index), parts.get(index + 1)) {
                annotations.apply(name, value);
            }
        }

        annotations
    }

    fn apply(&mut self, name: &str, value: &str) {
        let slot = match name {
            SPAWN_INVEST => Some(&mut self.invest),
            TRANSITIONED => Some(&mut self.transitioned),
            DISSIPATED => Some(&mut self.dissipated),
            GENESIS_NUMBER => {
                match parse_int(value) {
                    Some(gen_no) => self.gen_no = Some(gen_no),
                    None => debug!("Unparseable genesis number '{}'", value),
                }
                return;
            }
            _ => None,
        };

        if let Some(slot) = slot {
            if let Some(transition) = parse_transition(value) {
                *slot = Some(transition);
                return;
            }
        }

        self.user_data.insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StormCode;
    use chrono::{TimeZone, Utc};

    const BEST_LINE: &str = "WP, 01, 2015010200,   , BEST,   0,  89N, 1394E,  35, 1000, TS,  34, NEQ,   60,   50,   40,   50, 1006,  180,  30,  45,   0,   W,   0, JTW, 270,  12,  MEKKHALA, D, 12, NEQ, 120,  90,  60, 100";

    /// Pad a line with empty fields up to the user-defined section
    fn with_user_pairs(pairs: &[(&str, &str)]) -> String {
        let mut line = BEST_LINE.to_string();
        for (name, value) in pairs {
            line.push_str(&format!(", {}, {}", name, value));
        }
        line
    }

    #[test]
    fn test_decode_best_track_line() {
        let record = decode_record(BEST_LINE);

        assert_eq!(record.basin.as_deref(), Some("WP"));
        assert_eq!(record.storm_no, Some(1));
        assert_eq!(
            record.date,
            Some(Utc.with_ymd_and_hms(2015, 1, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(record.tech_num, None);
        assert_eq!(record.tech.as_deref(), Some("BEST"));
        assert_eq!(record.tau, Some(0));
        assert_eq!(record.lat, Some(8.9));
        assert_eq!(record.lon, Some(139.4));
        assert_eq!(record.max_sus_wind, Some(35));
        assert_eq!(record.min_sea_level_psur, Some(1000));
        assert_eq!(record.level.as_deref(), Some("tropical storm"));
        assert_eq!(record.wind_rad.rad, Some(34));
        assert_eq!(record.wind_rad.code.as_deref(), Some("NEQ"));
        assert_eq!(record.wind_rad.ne, Some(60));
        assert_eq!(record.wind_rad.nw, Some(50));
        assert_eq!(record.outer_psur, Some(1006));
        assert_eq!(record.outer_rad, Some(180));
        assert_eq!(record.max_wind_rad, Some(30));
        assert_eq!(record.wind_gust, Some(45));
        assert_eq!(record.eye_dia, Some(0));
        assert_eq!(record.sub_region.as_deref(), Some("Western Pacific"));
        assert_eq!(record.max_seas, Some(0));
        assert_eq!(record.forecaster.as_deref(), Some("JTW"));
        assert_eq!(record.dir, Some(270));
        assert_eq!(record.speed, Some(12));
        assert_eq!(record.name.as_deref(), Some("MEKKHALA"));
        assert_eq!(record.depth.as_deref(), Some("Deep"));
        assert_eq!(record.sea_rad.rad, Some(12));
        assert_eq!(record.sea_rad.code.as_deref(), Some("NEQ"));
        assert_eq!(record.sea_rad.nw, Some(100));
        assert!(record.user_data.is_empty());
        assert!(!record.has_lineage());
    }

    #[test]
    fn test_empty_line_is_all_absent() {
        let record = decode_record("");

        assert_eq!(record.basin, None);
        assert_eq!(record.storm_no, None);
        assert_eq!(record.date, None);
        assert_eq!(record.tau, None);
        assert_eq!(record.lat, Some(0.0));
        assert_eq!(record.lon, Some(0.0));
        assert_eq!(record.level, None);
        assert!(record.wind_rad.is_empty());
        assert!(record.sea_rad.is_empty());
        assert!(record.user_data.is_empty());
        assert!(!record.has_lineage());
    }

    #[test]
    fn test_short_line_leaves_trailing_fields_absent() {
        let record = decode_record("AL, 09, 2024062812, 03, OFCL, -12, 394S, 394W");

        assert_eq!(record.basin.as_deref(), Some("AL"));
        assert_eq!(record.storm_no, Some(9));
        assert_eq!(
            record.date,
            Some(Utc.with_ymd_and_hms(2024, 6, 28, 12, 0, 0).unwrap())
        );
        assert_eq!(record.tech_num, Some(3));
        assert_eq!(record.tau, Some(-12));
        assert_eq!(record.lat, Some(-39.4));
        assert_eq!(record.lon, Some(-39.4));
        assert_eq!(record.max_sus_wind, None);
        assert_eq!(record.name, None);
        assert!(record.wind_rad.is_empty());
        assert!(record.sea_rad.is_empty());
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        let record = decode_record(
            "WP, 01, 2015010200, , BEST, 0, 89N, 1394E, 35, 1000, ZZ, , , , , , , , , , , , K, , , , , , Y",
        );
        assert_eq!(record.level.as_deref(), Some("ZZ"));
        assert_eq!(record.sub_region.as_deref(), Some("K"));
        assert_eq!(record.depth.as_deref(), Some("Y"));
    }

    #[test]
    fn test_bad_timestamp_is_absent() {
        let record = decode_record("WP, 01, 20150102, , BEST");
        assert_eq!(record.date, None);
        assert_eq!(record.tech.as_deref(), Some("BEST"));
    }

    #[test]
    fn test_genesis_number() {
        let record = decode_record(&with_user_pairs(&[("genesis-num", "008")]));
        assert_eq!(record.gen_no, Some(8));
        assert!(record.user_data.is_empty());
    }

    #[test]
    fn test_unparseable_genesis_number_keeps_earlier_value() {
        let record = decode_record(&with_user_pairs(&[("genesis-num", "005"), ("genesis-num", "x")]));
        assert_eq!(record.gen_no, Some(5));
        assert!(record.user_data.is_empty());

        let record = decode_record(&with_user_pairs(&[("genesis-num", "x")]));
        assert_eq!(record.gen_no, None);
    }

    #[test]
    fn test_spawn_invest_with_leading_text() {
        let record = decode_record(&with_user_pairs(&[("SPAWNINVEST", "from wp712015 to wp902015")]));
        assert_eq!(
            record.invest,
            Some(LineageTransition::new(
                StormCode::new("wp", "71", "2015"),
                StormCode::new("wp", "90", "2015"),
            ))
        );
        assert!(record.user_data.is_empty());
    }

    #[test]
    fn test_spawn_invest() {
        let record = decode_record(&with_user_pairs(&[("SPAWNINVEST", "wp712015 to wp902015")]));
        let invest = record.invest.unwrap();

        assert_eq!(invest.from, Some(StormCode::new("wp", "71", "2015")));
        assert_eq!(invest.to, Some(StormCode::new("wp", "90", "2015")));
        assert_eq!(record.transitioned, None);
        assert!(record.user_data.is_empty());
    }

    #[test]
    fn test_transitioned_and_dissipated() {
        let record = decode_record(&with_user_pairs(&[
            ("TRANSITIONED", "sh982015 to sh162015"),
            ("DISSIPATED", "sh162015 sh982015"),
        ]));

        assert_eq!(
            record.transitioned,
            Some(LineageTransition::new(
                StormCode::new("sh", "98", "2015"),
                StormCode::new("sh", "16", "2015"),
            ))
        );
        assert_eq!(
            record.dissipated,
            Some(LineageTransition::new(
                StormCode::new("sh", "16", "2015"),
                StormCode::new("sh", "98", "2015"),
            ))
        );
    }

    #[test]
    fn test_unmatched_lineage_falls_through_to_user_data() {
        let record = decode_record(&with_user_pairs(&[("DISSIPATED", "unknown")]));
        assert_eq!(record.dissipated, None);
        assert_eq!(record.user_data.get("DISSIPATED").map(String::as_str), Some("unknown"));
    }

    #[test]
    fn test_unrecognized_pair_is_kept_verbatim() {
        let record = decode_record(&with_user_pairs(&[("FOO", "bar")]));
        assert_eq!(record.user_data.get("FOO").map(String::as_str), Some("bar"));
        assert!(!record.has_lineage());
    }

    #[test]
    fn test_repeated_user_field_keeps_last() {
        let record = decode_record(&with_user_pairs(&[("FOO", "first"), ("FOO", "second")]));
        assert_eq!(record.user_data.len(), 1);
        assert_eq!(record.user_data.get("FOO").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_pair_without_value_is_skipped() {
        let record = decode_record(&with_user_pairs(&[("FOO", "")]));
        assert!(record.user_data.is_empty());
    }

    #[test]
    fn test_only_five_pairs_are_read() {
        let record = decode_record(&with_user_pairs(&[
            ("A", "1"),
            ("B", "2"),
            ("C", "3"),
            ("D", "4"),
            ("E", "5"),
            ("F", "6"),
        ]));
        assert_eq!(record.user_data.len(), 5);
        assert!(!record.user_data.contains_key("F"));
    }
}
