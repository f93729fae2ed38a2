//! Storm code pair tokenizer for lineage annotations
//!
//! A lineage value names two storm codes of the form basin (2) + cyclone
//! id (2) + year (4), e.g. `wp712015 to wp902015` or `sh162015 sh982015`.
//! The joining `to` is optional and whitespace around it is free. The pair
//! may appear anywhere in the value; the first one found is used.

use tracing::debug;

use crate::constants::lineage::{BASIN_WIDTH, CODE_JOINER, ID_WIDTH, YEAR_WIDTH};
use crate::models::{LineageTransition, StormCode};

const STORM_CODE_WIDTH: usize = BASIN_WIDTH + ID_WIDTH + YEAR_WIDTH;

/// Extract the first `from` and `to` storm code pair found in a lineage value
///
/// Leading text such as `from` or a bracket is skipped; text after the
/// second code is ignored.
pub fn parse_transition(value: &str) -> Option<LineageTransition> {
    let found = value
        .char_indices()
        .find_map(|(start, _)| transition_at(&value[start..]));

    if found.is_none() {
        debug!("Lineage value '{}' has no storm code pair", value);
    }
    found
}

/// Match a storm code pair starting exactly at the front of `input`
fn transition_at(input: &str) -> Option<LineageTransition> {
    let (from, rest) = take_storm_code(input)?;

    let rest = rest.trim_start();
    let (to, _) = rest
        .strip_prefix(CODE_JOINER)
        .and_then(|after| take_storm_code(after.trim_start()))
        .or_else(|| take_storm_code(rest))?;

    Some(LineageTransition::new(from, to))
}

/// Split one storm code off the front of `input`
fn take_storm_code(input: &str) -> Option<(StormCode, &str)> {
    let code = input.get(..STORM_CODE_WIDTH)?;
    if !code.is_ascii() {
        return None;
    }

    let (basin, rest) = code.split_at(BASIN_WIDTH);
    let (id, year) = rest.split_at(ID_WIDTH);

    let valid = basin.bytes().all(|b| b.is_ascii_alphanumeric())
        && id.bytes().all(|b| b.is_ascii_alphanumeric())
        && year.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return None;
    }

    Some((
        StormCode::new(basin, id, year),
        &input[STORM_CODE_WIDTH..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_with_to() {
        let transition = parse_transition("wp712015 to wp902015").unwrap();
        assert_eq!(transition.from, Some(StormCode::new("wp", "71", "2015")));
        assert_eq!(transition.to, Some(StormCode::new("wp", "90", "2015")));
    }

    #[test]
    fn test_joined_with_whitespace_only() {
        let bare = parse_transition("sh162015 sh982015").unwrap();
        let joined = parse_transition("sh162015 to sh982015").unwrap();
        assert_eq!(bare, joined);
        assert_eq!(bare.from, Some(StormCode::new("sh", "16", "2015")));
        assert_eq!(bare.to, Some(StormCode::new("sh", "98", "2015")));
    }

    #[test]
    fn test_flexible_separator() {
        let expected = LineageTransition::new(
            StormCode::new("al", "92", "2020"),
            StormCode::new("al", "13", "2020"),
        );
        assert_eq!(parse_transition("  al922020   to   al132020"), Some(expected.clone()));
        assert_eq!(parse_transition("al922020toal132020"), Some(expected.clone()));
        assert_eq!(parse_transition("al922020al132020"), Some(expected.clone()));
        assert_eq!(parse_transition("al922020 to al132020 extra"), Some(expected));
    }

    #[test]
    fn test_leading_text_is_skipped() {
        let expected = LineageTransition::new(
            StormCode::new("wp", "71", "2015"),
            StormCode::new("wp", "90", "2015"),
        );
        assert_eq!(parse_transition("from wp712015 to wp902015"), Some(expected.clone()));
        assert_eq!(parse_transition("(wp712015 to wp902015)"), Some(expected.clone()));
        assert_eq!(parse_transition("é wp712015 wp902015"), Some(expected));
    }

    #[test]
    fn test_rejects_incomplete_values() {
        assert_eq!(parse_transition(""), None);
        assert_eq!(parse_transition("wp712015"), None);
        assert_eq!(parse_transition("wp712015 to"), None);
        assert_eq!(parse_transition("wp71201 wp902015"), None);
        assert_eq!(parse_transition("wp71abcd to wp902015"), None);
        assert_eq!(parse_transition("wp-12015 to wp902015"), None);
    }

    #[test]
    fn test_non_ascii_is_rejected() {
        assert_eq!(parse_transition("wpé12015 to wp902015"), None);
    }
}
