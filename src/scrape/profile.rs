// src/scrape/profile.rs
use tracing::{debug, info, warn};
use url::Url;

use crate::core::net::PageFetcher;
use crate::data::Identity;
use crate::error::ScrapeError;
use crate::specs::profile::identity_from_html;

/// Finds the signed-in reviewer: the page we already have first, else one
/// probe of the landing page. No retries.
pub struct ProfileResolver<'f> {
    fetcher: &'f dyn PageFetcher,
    landing: Url,
}

impl<'f> ProfileResolver<'f> {
    pub fn new(fetcher: &'f dyn PageFetcher, site: &Url) -> Self {
        Self { fetcher, landing: site.clone() }
    }

    pub async fn resolve(&self, local_page: Option<&str>) -> Result<Identity, ScrapeError> {
        if let Some(page) = local_page {
            match identity_from_html(page) {
                Some(id) => {
                    debug!("identity {} from local page", id.reviewer_id);
                    return Ok(id);
                }
                None => debug!("no profile link on local page, probing {}", self.landing),
            }
        }

        let url = self.landing.as_str();
        let page = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|source| ScrapeError::network(url, source))?;

        match identity_from_html(&page) {
            Some(id) => {
                info!("identity {} from {url}", id.reviewer_id);
                Ok(id)
            }
            None => {
                warn!("no profile link on {url}");
                Err(ScrapeError::IdentityNotFound)
            }
        }
    }
}
