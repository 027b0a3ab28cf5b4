use crate::constants;
use crate::domain::RawRow;

/// Applies the three per-row value cleaning rules. The rules are
/// independent of one another and of the stamped date/year fields; each
/// is a no-op when its column is absent (required-field enforcement
/// happens later, when the typed record is built).
pub fn clean_values(row: &mut RawRow) {
    clean_rerun_marker(row);
    clean_missing_household_rating(row);
    clean_time(row);
}

/// A show name ending in `" (r)"` marks a rerun. The marker is stripped
/// and IS_RERUN set to true; without the marker the flag stays absent
/// entirely, which is deliberately not the same as false.
fn clean_rerun_marker(row: &mut RawRow) {
    let Some(show) = row.get(constants::SHOW) else {
        return;
    };

    if let Some(marker_at) = show.find(constants::RERUN_MARKER) {
        let truncated = show[..marker_at].to_string();
        row.insert(constants::SHOW.to_string(), truncated);
        row.insert(constants::IS_RERUN.to_string(), "true".to_string());
    }
}

/// The source writes `9.99` when the 18-49 household rating is not
/// available. Drop the column outright rather than keep a fake number.
fn clean_missing_household_rating(row: &mut RawRow) {
    if row
        .get(constants::PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49)
        .is_some_and(|v| v == constants::MISSING_RATING_SENTINEL)
    {
        row.remove(constants::PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49);
    }
}

/// Normalizes the timeslot token: lower-case, no whitespace or periods,
/// then exactly one of the am/pm rules. "pm" slots keep no suffix at all,
/// "am" slots keep a single trailing "a".
fn clean_time(row: &mut RawRow) {
    let Some(time) = row.get(constants::TIME) else {
        return;
    };

    let mut cleaned: String = time
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();

    // First matching rule wins
    if cleaned.contains("pm") {
        cleaned = cleaned.replace("pm", "");
    } else if cleaned.contains('p') {
        cleaned = cleaned.replace('p', "");
    } else if cleaned.contains("am") {
        cleaned = cleaned.replace("am", "a");
    }

    row.insert(constants::TIME.to_string(), cleaned);
}
