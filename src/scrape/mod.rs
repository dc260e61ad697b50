// src/scrape/mod.rs
mod scrape;
mod profile;
mod ratings;
mod reviews;

pub use profile::ProfileResolver;
pub use ratings::{RatingsIngestor, map_rows};
pub use reviews::ReviewsSession;
pub use scrape::resolve_identity;
pub use scrape::retrieve_reviews;
pub use scrape::retrieve_ratings;
pub use scrape::retrieve_all;
