// src/scrape/reviews.rs
//
// Pagination over the reviews list.
//
//   Fetching ──ok──▶ Extracting ──▶ Deciding ──next, unseen──▶ Fetching
//      │                                │
//      └─err──▶ Failed                  └─no next / seen / bad link──▶ Done | Failed
//
// One fetch in flight at a time; page N+1 is only known after page N is parsed.
// A failure anywhere drops everything gathered so far.

use std::collections::HashSet;

use tracing::{debug, error, info};
use url::Url;

use crate::config::consts::REVIEWS_FIRST_PAGE;
use crate::core::net::PageFetcher;
use crate::data::{Identity, PageResult};
use crate::error::ScrapeError;
use crate::progress::Progress;
use crate::specs::entry::FieldExtractor;
use crate::specs::reviews::{self, ReviewsPage};

enum State {
    Fetching(Url),
    Extracting { url: Url, html: String },
    Deciding { url: Url, next_href: Option<String>, total: Option<u32> },
    Done,
    Failed(ScrapeError),
}

/// One reviews extraction. Owns its identity and visited set; consumed by `run`.
pub struct ReviewsSession<'f> {
    fetcher: &'f dyn PageFetcher,
    identity: Identity,
    extractor: FieldExtractor,
    user_base: Url,
    visited: HashSet<String>,
    page: usize,
}

impl<'f> ReviewsSession<'f> {
    pub fn new(fetcher: &'f dyn PageFetcher, site: &Url, identity: &Identity) -> Result<Self, ScrapeError> {
        let user_path = format!("user/{}/", identity.reviewer_id);
        let user_base = site
            .join(&user_path)
            .map_err(|e| ScrapeError::parse(site.as_str(), format!("reviewer URL {user_path}: {e}")))?;

        Ok(Self {
            fetcher,
            identity: identity.clone(),
            extractor: FieldExtractor::new(site.clone()),
            user_base,
            visited: HashSet::new(),
            page: 1,
        })
    }

    /// `<site>/user/<id>/comments-expanded`
    pub fn first_url(&self) -> Result<Url, ScrapeError> {
        self.user_base
            .join(REVIEWS_FIRST_PAGE)
            .map_err(|e| ScrapeError::parse(self.user_base.as_str(), e.to_string()))
    }

    /// The result's head is the identity the URLs were built from.
    pub async fn run(mut self, progress: &mut dyn Progress) -> Result<PageResult, ScrapeError> {
        let mut result = PageResult::new(self.identity.clone());

        let mut state = match self.first_url() {
            Ok(url) => {
                self.visited.insert(s!(url.as_str()));
                progress.log("Fetching reviews…");
                State::Fetching(url)
            }
            Err(e) => State::Failed(e),
        };

        loop {
            state = match state {
                State::Fetching(url) => {
                    debug!("GET {url}");
                    match self.fetcher.fetch(url.as_str()).await {
                        Ok(html) => State::Extracting { url, html },
                        Err(source) => State::Failed(ScrapeError::network(url.as_str(), source)),
                    }
                }

                State::Extracting { url, html } => {
                    let ReviewsPage { records, skipped, next_href, total_pages } =
                        reviews::parse_page(&html, &self.extractor);
                    info!("page {}: {} reviews ({} skipped) from {url}", self.page, records.len(), skipped);
                    result.data.extend(records);
                    State::Deciding { url, next_href, total: total_pages }
                }

                State::Deciding { url, next_href, total } => self.decide(&url, next_href, total, progress),

                State::Done => {
                    info!("reviews done: {} records over {} page(s)", result.len(), self.page);
                    progress.finish();
                    return Ok(result);
                }

                State::Failed(e) => {
                    error!("reviews failed on page {}: {e}", self.page);
                    progress.finish();
                    return Err(e);
                }
            };
        }
    }

    fn decide(&mut self, current: &Url, next_href: Option<String>, total: Option<u32>, progress: &mut dyn Progress) -> State {
        let Some(href) = next_href else {
            return State::Done;
        };
        let next = match self.user_base.join(&href) {
            Ok(u) => u,
            Err(e) => {
                return State::Failed(ScrapeError::parse(
                    current.as_str(),
                    format!("unusable next-page link {href:?}: {e}"),
                ));
            }
        };
        if !self.visited.insert(s!(next.as_str())) {
            // already fetched: the pager points backwards, stop here
            debug!("next link {next} already visited, stopping");
            return State::Done;
        }
        self.page += 1;
        progress.page(self.page, total);
        State::Fetching(next)
    }
}
