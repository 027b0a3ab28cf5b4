use chrono::Datelike;
use tracing::info;

use crate::constants;
use crate::domain::TelevisionRating;
use crate::error::Result;
use crate::pipeline::processing::clean::clean_values;
use crate::pipeline::processing::columns::normalize_columns;
use crate::pipeline::processing::extract::extract_table_rows;
use crate::pipeline::processing::title::parse_title_date;

/// Turns one ratings post (title + body HTML) into canonical records.
///
/// The air date parsed from the title is stamped onto every raw row
/// before column normalization and value cleaning run, so the whole
/// batch shares one RATINGS_OCCURRED_ON and YEAR. Any unrecognized
/// column, bad value, or missing field fails the whole post.
pub fn assemble_post(title: &str, body_html: &str) -> Result<Vec<TelevisionRating>> {
    let raw_rows = extract_table_rows(body_html)?;
    let air_date = parse_title_date(title)?;

    let mut ratings = Vec::with_capacity(raw_rows.len());
    for mut row in raw_rows {
        row.insert(
            constants::RATINGS_OCCURRED_ON.to_string(),
            air_date.format("%Y-%m-%d").to_string(),
        );
        row.insert(constants::YEAR.to_string(), air_date.year().to_string());

        let mut normalized = normalize_columns(row)?;
        clean_values(&mut normalized);
        ratings.push(TelevisionRating::from_row(normalized)?);
    }

    info!(
        "assemble_post: title={:?} air_date={} records={}",
        title,
        air_date,
        ratings.len()
    );
    Ok(ratings)
}
