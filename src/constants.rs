//! Canonical column names and other fixed values shared across the pipeline.
//! These match the columns of the ratings table in the record store.

pub const RATINGS_OCCURRED_ON: &str = "RATINGS_OCCURRED_ON";
pub const TIME: &str = "TIME";
pub const SHOW: &str = "SHOW";
pub const TOTAL_VIEWERS: &str = "TOTAL_VIEWERS";
pub const PERCENTAGE_OF_HOUSEHOLDS: &str = "PERCENTAGE_OF_HOUSEHOLDS";
pub const TOTAL_VIEWERS_AGE_18_49: &str = "TOTAL_VIEWERS_AGE_18_49";
pub const PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49: &str = "PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49";
pub const YEAR: &str = "YEAR";
pub const IS_RERUN: &str = "IS_RERUN";

/// Every canonical column a normalized row may carry.
pub const CANONICAL_COLUMNS: &[&str] = &[
    RATINGS_OCCURRED_ON,
    TIME,
    SHOW,
    TOTAL_VIEWERS,
    PERCENTAGE_OF_HOUSEHOLDS,
    TOTAL_VIEWERS_AGE_18_49,
    PERCENTAGE_OF_HOUSEHOLDS_AGE_18_49,
    YEAR,
    IS_RERUN,
];

/// The source marks a rerun by appending this to the show name.
pub const RERUN_MARKER: &str = " (r)";

/// Raw value the source uses for "18-49 household rating not available".
/// Such a rating is absent in the canonical record, never zero.
pub const MISSING_RATING_SENTINEL: &str = "9.99";

/// Partition key under which distinct show names are indexed.
pub const SHOW_NAME_PARTITION: &str = "ratings#showName";

/// Posts that mention "ratings" in the title but carry no ratings table.
/// Extend this list when a new false positive shows up in the search feed.
pub const EXCLUDED_RATINGS_TITLES: &[&str] = &["The Future Of Ratings | Toonami Faithful"];
