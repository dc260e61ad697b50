// src/scrape/ratings.rs
//
// Ratings come from the site's CSV export in one response, no paging.
// Only the user's own columns are kept: the rating, the title/URL it is for,
// and when it was made. The export's "modified" column is ignored.

use tracing::{debug, info};
use url::Url;

use crate::config::consts::RATINGS_EXPORT_PATH;
use crate::core::{date, net::PageFetcher};
use crate::csv::{self, Row};
use crate::data::{Identity, PageResult, Record};
use crate::error::ScrapeError;
use crate::progress::Progress;

const OWN_RATING: &str = "You rated";

pub struct RatingsIngestor<'f> {
    fetcher: &'f dyn PageFetcher,
    site: Url,
}

impl<'f> RatingsIngestor<'f> {
    pub fn new(fetcher: &'f dyn PageFetcher, site: &Url) -> Self {
        Self { fetcher, site: site.clone() }
    }

    /// `<site>/list/export?list_id=ratings&author_id=<id>`
    pub fn export_url(&self, identity: &Identity) -> Result<Url, ScrapeError> {
        let mut url = self
            .site
            .join(RATINGS_EXPORT_PATH)
            .map_err(|e| ScrapeError::parse(self.site.as_str(), e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("list_id", "ratings")
            .append_pair("author_id", &identity.reviewer_id);
        Ok(url)
    }

    pub async fn ingest(&self, identity: &Identity, progress: &mut dyn Progress) -> Result<PageResult, ScrapeError> {
        let url = self.export_url(identity)?;
        progress.log("Fetching ratings…");

        let text = match self.fetcher.fetch(url.as_str()).await {
            Ok(t) => t,
            Err(source) => {
                progress.finish();
                return Err(ScrapeError::network(url.as_str(), source));
            }
        };
        let rows = match csv::parse_records(&text) {
            Ok(r) => r,
            Err(source) => {
                progress.finish();
                return Err(ScrapeError::Export { url: s!(url.as_str()), source });
            }
        };

        let data = map_rows(identity, &rows);
        info!("ratings: {} of {} rows kept", data.len(), rows.len());
        progress.finish();
        Ok(PageResult { head: identity.clone(), data })
    }
}

/// Drop placeholder rows (no URL and no Title), map the rest.
pub fn map_rows(identity: &Identity, rows: &[Row]) -> Vec<Record> {
    let other_rated = identity.rated_column();

    rows.iter()
        .filter(|row| field(row, "URL").is_some() || field(row, "Title").is_some())
        .filter_map(|row| {
            let Some(subject) = field(row, "Title") else {
                debug!("rating row without a title skipped: {:?}", field(row, "URL"));
                return None;
            };
            let star_rating = field(row, OWN_RATING)
                .or_else(|| other_rated.as_deref().and_then(|col| field(row, col)));

            Some(Record {
                subject: s!(subject),
                subject_url: field(row, "URL").map(String::from).unwrap_or_default(),
                star_rating: star_rating.map(String::from),
                date_posted: field(row, "created").and_then(date::normalize),
                ..Record::default()
            })
        })
        .collect()
}

/// Trimmed, non-empty cell.
fn field<'r>(row: &'r Row, key: &str) -> Option<&'r str> {
    row.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}
