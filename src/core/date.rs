// src/core/date.rs
//
// Loose date text → `YYYY-MM-DD`. Reviews carry "12 March 2019"; the ratings
// export's `created` column looks like "Sat Feb  9 00:00:00 2013".
// Anything unrecognized is `None`: one bad date must not sink a whole export.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::sanitize::normalize_ws;

// %B also accepts the three-letter abbreviation when parsing.
const DATE_FORMATS: &[&str] = &[
    "%d %B %Y",  // 12 March 2019
    "%B %d, %Y", // March 12, 2019
    "%B %d %Y",  // March 12 2019
    "%Y-%m-%d",  // 2019-03-12
];

const DATETIME_FORMATS: &[&str] = &[
    "%a %B %d %H:%M:%S %Y", // Sat Feb 9 00:00:00 2013
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// chrono lets a format space match nothing and takes short years literally, so
/// "March 2019" reads as March 20, year 19. Only four-digit years count.
fn full_year(d: NaiveDate) -> Option<NaiveDate> {
    (d.year() >= 1000).then_some(d)
}

pub fn normalize(raw: &str) -> Option<String> {
    parse(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn parse(raw: &str) -> Option<NaiveDate> {
    let text = normalize_ws(raw);
    let text = text.trim_end_matches(['.', ',']);
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok().and_then(full_year))
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|f| {
                NaiveDateTime::parse_from_str(text, f)
                    .ok()
                    .and_then(|dt| full_year(dt.date()))
            })
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .and_then(|dt| full_year(dt.date_naive()))
        })
}
