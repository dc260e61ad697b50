// src/csv.rs
use std::collections::HashMap;

use ::csv::{ReaderBuilder, WriterBuilder};

use crate::data::{DataKind, PageResult};

/// One CSV row keyed by its header cell.
pub type Row = HashMap<String, String>;

/* ---------------- Parsing ---------------- */

/// Header-keyed rows. Short rows only get the columns they have; long rows
/// drop the extra cells. Quotes and CRLF are the `csv` crate's problem.
pub fn parse_records(text: &str) -> Result<Vec<Row>, ::csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| s!(h.trim()))
        .collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        rows.push(
            headers
                .iter()
                .cloned()
                .zip(rec.iter().map(String::from))
                .collect(),
        );
    }
    Ok(rows)
}

/* ---------------- Writing ---------------- */

/// Create a full export string for one result set.
/// - `include_headers`: whether to emit a header line
/// - `delim`: field separator (`b','` or `b'\t'`)
pub fn to_export_string(
    kind: DataKind,
    result: &PageResult,
    include_headers: bool,
    delim: u8,
) -> Result<String, ::csv::Error> {
    let mut w = WriterBuilder::new()
        .delimiter(delim)
        .from_writer(Vec::new());

    if include_headers {
        w.write_record(kind.headers())?;
    }
    for r in &result.data {
        w.write_record(kind.row(r))?;
    }

    let buf = w
        .into_inner()
        .map_err(|e| ::csv::Error::from(e.into_error()))?;

    Ok(match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Identity, Record};

    #[test]
    fn records_are_keyed_by_header() {
        let text = "position,Title,URL,You rated,created\r\n\
                    1,\"Movie, A\",http://www.imdb.com/title/tt1/,8,Mon Jan 06 00:00:00 2020\r\n\
                    2,,\r\n";
        let rows = parse_records(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Title"], "Movie, A");
        assert_eq!(rows[0]["You rated"], "8");
        assert_eq!(rows[1].get("You rated"), None);
    }

    #[test]
    fn empty_export_has_no_rows() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("Title,URL\n").unwrap().is_empty());
    }

    #[test]
    fn export_string_quotes_and_orders_columns() {
        let result = PageResult {
            head: Identity::new("ur1", None),
            data: vec![Record {
                subject: s!("Movie, A"),
                subject_url: s!("u1"),
                star_rating: Some(s!("8")),
                ..Record::default()
            }],
        };
        let out = to_export_string(DataKind::Ratings, &result, true, b',').unwrap();
        assert_eq!(out, "subject,subjectIMDBURL,starRating,datePosted\n\"Movie, A\",u1,8,\n");

        let tsv = to_export_string(DataKind::Ratings, &result, false, b'\t').unwrap();
        assert_eq!(tsv, "Movie, A\tu1\t8\t\n");
    }
}
