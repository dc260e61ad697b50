// src/scrape/scrape.rs
use tracing::{info, warn};

use crate::{
    config::options::{ScrapeOptions, Target},
    core::net::PageFetcher,
    data::{Datasets, Identity, PageResult},
    error::ScrapeError,
    progress::Progress,
    specs::profile,
};

use super::{ProfileResolver, RatingsIngestor, ReviewsSession};

/// Who we're scraping for. A supplied identity wins; otherwise the local page,
/// then one probe of the site. A local page showing the sign-in prompt stops
/// everything before any request is made.
pub async fn resolve_identity(
    fetcher: &dyn PageFetcher,
    scrape: &ScrapeOptions,
) -> Result<Identity, ScrapeError> {
    if let Some(page) = scrape.local_page.as_deref() {
        if !profile::signed_in_html(page) {
            warn!("local page shows the sign-in prompt");
            return Err(ScrapeError::NotSignedIn);
        }
    }
    if let Some(id) = &scrape.identity {
        return Ok(id.clone());
    }
    ProfileResolver::new(fetcher, &scrape.site)
        .resolve(scrape.local_page.as_deref())
        .await
}

/// All of the reviewer's reviews, in site order.
pub async fn retrieve_reviews(
    fetcher: &dyn PageFetcher,
    scrape: &ScrapeOptions,
    progress: &mut dyn Progress,
) -> Result<PageResult, ScrapeError> {
    let identity = resolve_identity(fetcher, scrape).await?;
    reviews_for(fetcher, scrape, identity, progress).await
}

/// The reviewer's ratings, via the CSV export. `identity` skips resolution.
pub async fn retrieve_ratings(
    fetcher: &dyn PageFetcher,
    scrape: &ScrapeOptions,
    identity: Option<Identity>,
    progress: &mut dyn Progress,
) -> Result<PageResult, ScrapeError> {
    let identity = match identity {
        Some(id) => id,
        None => resolve_identity(fetcher, scrape).await?,
    };
    RatingsIngestor::new(fetcher, &scrape.site)
        .ingest(&identity, progress)
        .await
}

/// Whatever `scrape.target` asks for. Identity is resolved once and shared.
pub async fn retrieve_all(
    fetcher: &dyn PageFetcher,
    scrape: &ScrapeOptions,
    progress: &mut dyn Progress,
) -> Result<Datasets, ScrapeError> {
    let identity = resolve_identity(fetcher, scrape).await?;
    let mut out = Datasets::default();

    if matches!(scrape.target, Target::Reviews | Target::All) {
        out.reviews = Some(reviews_for(fetcher, scrape, identity.clone(), progress).await?);
    }
    if matches!(scrape.target, Target::Ratings | Target::All) {
        // same head as the reviews, when there are any
        let head = out.reviews.as_ref().map(|r| r.head.clone()).unwrap_or(identity);
        out.ratings = Some(retrieve_ratings(fetcher, scrape, Some(head), progress).await?);
    }

    info!(
        "retrieved {} review(s), {} rating(s)",
        out.reviews.as_ref().map_or(0, PageResult::len),
        out.ratings.as_ref().map_or(0, PageResult::len),
    );
    Ok(out)
}

async fn reviews_for(
    fetcher: &dyn PageFetcher,
    scrape: &ScrapeOptions,
    identity: Identity,
    progress: &mut dyn Progress,
) -> Result<PageResult, ScrapeError> {
    ReviewsSession::new(fetcher, &scrape.site, &identity)?
        .run(progress)
        .await
}
