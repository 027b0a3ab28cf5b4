use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::constants::EXCLUDED_RATINGS_TITLES;
use crate::domain::RawRow;
use crate::error::{RatingsError, Result};

/// Gate applied before any table extraction: a post is only worth parsing
/// when its title mentions "ratings" and is not a known false positive.
pub fn is_ratings_post(title: &str) -> bool {
    if EXCLUDED_RATINGS_TITLES.contains(&title) {
        debug!("is_ratings_post: deny-listed title {:?}", title);
        return false;
    }

    title.to_lowercase().contains("ratings")
}

/// Extracts the ratings table embedded in a post body into raw rows keyed
/// by the literal header text. Nothing is renamed or cleaned here.
pub fn extract_table_rows(body_html: &str) -> Result<Vec<RawRow>> {
    let document = Html::parse_fragment(body_html);
    let th_selector = Selector::parse("thead th").unwrap();
    let tr_selector = Selector::parse("tbody tr").unwrap();
    let td_selector = Selector::parse("td").unwrap();

    let header_columns: Vec<String> = document
        .select(&th_selector)
        .map(|th| th.text().collect::<String>())
        .collect();

    if header_columns.is_empty() {
        return Err(RatingsError::MalformedTable(
            "no table header found in post body".to_string(),
        ));
    }
    debug!("extract_table_rows: header_columns={:?}", header_columns);

    let mut rows = Vec::new();
    for table_row in document.select(&tr_selector) {
        let cells: Vec<String> = table_row
            .select(&td_selector)
            .map(|td| td.text().collect::<String>())
            .collect();

        if cells.len() != header_columns.len() {
            return Err(RatingsError::MalformedTable(format!(
                "row has {} cells but the header has {} columns",
                cells.len(),
                header_columns.len()
            )));
        }

        let row: RawRow = header_columns.iter().cloned().zip(cells).collect();
        if row.len() != header_columns.len() {
            return Err(RatingsError::MalformedTable(
                "duplicate header columns are not supported".to_string(),
            ));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(RatingsError::MalformedTable(
            "no table body rows found in post body".to_string(),
        ));
    }

    info!("extract_table_rows: extracted {} rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_HTML: &str = r#"
        <table>
          <thead>
            <tr><th>Time</th><th>Show</th><th>Viewers (000)</th></tr>
          </thead>
          <tbody>
            <tr><td>12:00a</td><td>My Hero Academia (r)</td><td>590</td></tr>
            <tr><td>12:30a</td><td>Demon Slayer</td><td>570</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn zips_headers_against_body_cells() {
        let rows = extract_table_rows(POST_HTML).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Time"], "12:00a");
        assert_eq!(rows[0]["Show"], "My Hero Academia (r)");
        assert_eq!(rows[1]["Viewers (000)"], "570");
    }

    #[test]
    fn missing_header_is_malformed() {
        let err = extract_table_rows("<table><tbody><tr><td>12a</td></tr></tbody></table>")
            .unwrap_err();
        assert!(matches!(err, RatingsError::MalformedTable(_)));
    }

    #[test]
    fn ragged_row_is_malformed() {
        let html = r#"
            <table>
              <thead><tr><th>Time</th><th>Show</th></tr></thead>
              <tbody><tr><td>12:00a</td></tr></tbody>
            </table>"#;

        let err = extract_table_rows(html).unwrap_err();
        match err {
            RatingsError::MalformedTable(message) => {
                assert!(message.contains("1 cells"), "message: {message}")
            }
            other => panic!("expected MalformedTable, got {other:?}"),
        }
    }

    #[test]
    fn title_filter_requires_the_word_ratings() {
        assert!(is_ratings_post("Toonami Ratings for November 2nd, 2019"));
        assert!(is_ratings_post("toonami RATINGS thread"));
        assert!(!is_ratings_post("Toonami schedule for November"));
    }

    #[test]
    fn title_filter_honors_the_deny_list() {
        assert!(!is_ratings_post("The Future Of Ratings | Toonami Faithful"));
    }
}
