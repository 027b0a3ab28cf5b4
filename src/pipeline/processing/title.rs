use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{RatingsError, Result};

// Matches a "Month 2nd, 2019" style date anywhere in the title. Ordinal
// suffixes and the comma are optional; surrounding text is discarded.
static TITLE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2})(?:st|nd|rd|th)?\s*,?\s*(\d{4})",
    )
    .unwrap()
});

/// Pulls the broadcast date out of a free-text post title such as
/// `"Toonami Ratings for November 2nd, 2019"`.
pub fn parse_title_date(title: &str) -> Result<NaiveDate> {
    let caps = TITLE_DATE
        .captures(title)
        .ok_or_else(|| RatingsError::TitleDate {
            title: title.to_string(),
        })?;

    let month = month_number(&caps[1]);
    let day: u32 = caps[2].parse().map_err(|_| RatingsError::TitleDate {
        title: title.to_string(),
    })?;
    let year: i32 = caps[3].parse().map_err(|_| RatingsError::TitleDate {
        title: title.to_string(),
    })?;

    let air_date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| RatingsError::TitleDate {
            title: title.to_string(),
        })?;

    debug!("parse_title_date: title={:?} air_date={}", title, air_date);
    Ok(air_date)
}

fn month_number(month_name: &str) -> u32 {
    match month_name.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        // The regex alternation only admits the twelve names above
        _ => unreachable!(),
    }
}
