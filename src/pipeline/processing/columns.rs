use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::constants::{self, CANONICAL_COLUMNS};
use crate::domain::RawRow;
use crate::error::{RatingsError, Result};

/// Lower-cased, trimmed post column name -> record store column name.
/// Grown over the years as posters renamed their table headers; an
/// unrecognized header is an error, never a silent pass-through.
static COLUMN_NAME_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("atotal", constants::TOTAL_VIEWERS_AGE_18_49),
        ("ahousehold", constants::PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49),
        ("date", constants::RATINGS_OCCURRED_ON),
        ("household", constants::PERCENTAGE_OF_HOUSEHOLDS),
        ("rating", constants::PERCENTAGE_OF_HOUSEHOLDS),
        ("ratings_occurred_on", constants::RATINGS_OCCURRED_ON),
        ("show", constants::SHOW),
        ("program", constants::SHOW),
        ("time", constants::TIME),
        ("timeslot", constants::TIME),
        ("total", constants::TOTAL_VIEWERS),
        ("viewers", constants::TOTAL_VIEWERS),
        ("viewers (000)", constants::TOTAL_VIEWERS),
        ("viewers (000s)", constants::TOTAL_VIEWERS),
        ("18-49", constants::PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49),
        ("18-49 rating", constants::PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49),
        ("18-49 views (000)", constants::TOTAL_VIEWERS_AGE_18_49),
        ("year", constants::YEAR),
        ("is_rerun", constants::IS_RERUN),
    ])
});

/// Headers that carry no ratings data and are dropped rather than mapped.
static KEYS_TO_IGNORE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["rank", "change", "vs last week", "vs. last week", "+/-"])
});

/// Renames every key of one raw row to its canonical column name.
///
/// Keys already canonical are left alone, ignore-listed keys are dropped
/// with their values, and anything else fails with the lower-cased header
/// so the lookup table can be extended. Running this twice is a no-op.
pub fn normalize_columns(row: RawRow) -> Result<RawRow> {
    let mut normalized = RawRow::with_capacity(row.len());

    for (header, value) in row {
        if CANONICAL_COLUMNS.contains(&header.as_str()) {
            normalized.insert(header, value);
            continue;
        }

        let lookup = header.trim().to_lowercase();
        if KEYS_TO_IGNORE.contains(lookup.as_str()) {
            debug!("normalize_columns: dropping ignored header {:?}", header);
            continue;
        }

        match COLUMN_NAME_MAP.get(lookup.as_str()) {
            Some(canonical) => {
                normalized.insert((*canonical).to_string(), value);
            }
            None => return Err(RatingsError::UnrecognizedColumn { header: lookup }),
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn maps_post_headers_to_canonical_names() {
        let normalized = normalize_columns(row(&[
            ("Time", "12:00a"),
            ("Show", "My Hero Academia"),
            ("Viewers (000)", "590"),
            ("18-49 Rating", "0.29"),
            ("18-49 Views (000)", "380"),
        ]))
        .unwrap();

        assert_eq!(normalized["TIME"], "12:00a");
        assert_eq!(normalized["SHOW"], "My Hero Academia");
        assert_eq!(normalized["TOTAL_VIEWERS"], "590");
        assert_eq!(normalized["PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49"], "0.29");
        assert_eq!(normalized["TOTAL_VIEWERS_AGE_18_49"], "380");
    }

    #[test]
    fn is_idempotent_on_already_normalized_rows() {
        let once = normalize_columns(row(&[("Timeslot", "11:30"), ("Program", "Naruto")])).unwrap();
        let twice = normalize_columns(once.clone()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn drops_ignore_listed_headers_with_their_values() {
        let normalized = normalize_columns(row(&[
            ("Rank", "3"),
            ("Change", "+2"),
            ("Show", "One Piece"),
        ]))
        .unwrap();

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized["SHOW"], "One Piece");
    }

    #[test]
    fn unrecognized_header_fails_with_the_lowercased_name() {
        let err = normalize_columns(row(&[("  Share %  ", "1.2")])).unwrap_err();

        match err {
            RatingsError::UnrecognizedColumn { header } => assert_eq!(header, "share %"),
            other => panic!("expected UnrecognizedColumn, got {other:?}"),
        }
    }

    #[test]
    fn viewers_header_is_mapped() {
        // Regression: "viewers" and "viewers (000s)" were once missing
        let normalized = normalize_columns(row(&[("Viewers", "700")])).unwrap();
        assert_eq!(normalized["TOTAL_VIEWERS"], "700");

        let normalized = normalize_columns(row(&[("Viewers (000s)", "712")])).unwrap();
        assert_eq!(normalized["TOTAL_VIEWERS"], "712");
    }
}
