use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{RatingsError, Result};

/// One extracted table row before normalization: literal header text -> cell text.
pub type RawRow = HashMap<String, String>;

/// Television rating for one night, one timeslot, one show.
///
/// Serialized field names are the record store's column names. `is_rerun`
/// is only ever present when a rerun marker was found in the source; its
/// absence is not the same thing as `false` and must survive serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TelevisionRating {
    pub ratings_occurred_on: NaiveDate,
    pub time: String,
    pub show: String,
    pub total_viewers: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_of_households: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_viewers_age_18_49: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage_of_households_age_18_49: Option<f64>,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_rerun: Option<bool>,
}

impl TelevisionRating {
    /// Builds a fully-typed rating from a normalized, cleaned row.
    ///
    /// Either every required field parses or the row is rejected with the
    /// offending field and raw value; garbage is never coerced to zero.
    pub fn from_row(mut row: RawRow) -> Result<Self> {
        let occurred_on_raw = take_required(&mut row, constants::RATINGS_OCCURRED_ON)?;
        let ratings_occurred_on = NaiveDate::parse_from_str(&occurred_on_raw, "%Y-%m-%d")
            .map_err(|_| RatingsError::InvalidValue {
                field: constants::RATINGS_OCCURRED_ON,
                value: occurred_on_raw.clone(),
            })?;

        let time = take_required(&mut row, constants::TIME)?;
        let show = take_required(&mut row, constants::SHOW)?;

        let viewers_raw = take_required(&mut row, constants::TOTAL_VIEWERS)?;
        let total_viewers = parse_u32(constants::TOTAL_VIEWERS, &viewers_raw)?;

        let percentage_of_households = row
            .remove(constants::PERCENTAGE_OF_HOUSEHOLDS)
            .map(|v| parse_f64(constants::PERCENTAGE_OF_HOUSEHOLDS, &v))
            .transpose()?;

        let total_viewers_age_18_49 = row
            .remove(constants::TOTAL_VIEWERS_AGE_18_49)
            .map(|v| parse_u32(constants::TOTAL_VIEWERS_AGE_18_49, &v))
            .transpose()?;

        let percentage_of_households_age_18_49 = row
            .remove(constants::PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49)
            .map(|v| parse_f64(constants::PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49, &v))
            .transpose()?;

        let year = match row.remove(constants::YEAR) {
            Some(v) => v.parse::<i32>().map_err(|_| RatingsError::InvalidValue {
                field: constants::YEAR,
                value: v,
            })?,
            None => ratings_occurred_on.year(),
        };

        let is_rerun = row
            .remove(constants::IS_RERUN)
            .map(|v| match v.to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(RatingsError::InvalidValue {
                    field: constants::IS_RERUN,
                    value: v.clone(),
                }),
            })
            .transpose()?;

        Ok(TelevisionRating {
            ratings_occurred_on,
            time,
            show,
            total_viewers,
            percentage_of_households,
            total_viewers_age_18_49,
            percentage_of_households_age_18_49,
            year,
            is_rerun,
        })
    }
}

fn take_required(row: &mut RawRow, field: &'static str) -> Result<String> {
    row.remove(field).ok_or(RatingsError::MissingField(field))
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| RatingsError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_f64(field: &'static str, value: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| RatingsError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_row() -> RawRow {
        let mut row = RawRow::new();
        row.insert(constants::RATINGS_OCCURRED_ON.to_string(), "2019-11-02".to_string());
        row.insert(constants::TIME.to_string(), "12a".to_string());
        row.insert(constants::SHOW.to_string(), "My Hero Academia".to_string());
        row.insert(constants::TOTAL_VIEWERS.to_string(), "590".to_string());
        row.insert(constants::YEAR.to_string(), "2019".to_string());
        row
    }

    #[test]
    fn builds_record_with_optionals_absent() {
        let rating = TelevisionRating::from_row(complete_row()).unwrap();

        assert_eq!(
            rating.ratings_occurred_on,
            NaiveDate::from_ymd_opt(2019, 11, 2).unwrap()
        );
        assert_eq!(rating.total_viewers, 590);
        assert_eq!(rating.year, 2019);
        assert_eq!(rating.percentage_of_households, None);
        assert_eq!(rating.is_rerun, None);
    }

    #[test]
    fn absent_rerun_flag_is_not_serialized() {
        let rating = TelevisionRating::from_row(complete_row()).unwrap();
        let json = serde_json::to_value(&rating).unwrap();

        assert!(json.get("IS_RERUN").is_none());
        assert_eq!(json["SHOW"], "My Hero Academia");
    }

    #[test]
    fn year_defaults_to_air_date_year() {
        let mut row = complete_row();
        row.remove(constants::YEAR);

        let rating = TelevisionRating::from_row(row).unwrap();
        assert_eq!(rating.year, 2019);
    }

    #[test]
    fn garbage_viewer_count_is_an_error_not_zero() {
        let mut row = complete_row();
        row.insert(constants::TOTAL_VIEWERS.to_string(), "n/a".to_string());

        let err = TelevisionRating::from_row(row).unwrap_err();
        match err {
            RatingsError::InvalidValue { field, value } => {
                assert_eq!(field, constants::TOTAL_VIEWERS);
                assert_eq!(value, "n/a");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn missing_show_is_rejected() {
        let mut row = complete_row();
        row.remove(constants::SHOW);

        let err = TelevisionRating::from_row(row).unwrap_err();
        assert!(matches!(err, RatingsError::MissingField(f) if f == constants::SHOW));
    }
}
