// src/error.rs
//
// Session-level failures. Entry-level anomalies never show up here: the
// extractor drops those entries and the session carries on.

use thiserror::Error;

use crate::core::net::FetchError;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No reviewer id on the local page nor on the landing page.
    #[error("Could not find your IMDb profile.")]
    IdentityNotFound,

    /// The supplied page shows the sign-in prompt.
    #[error("You need to be signed in to IMDb.")]
    NotSignedIn,

    /// A page, landing page or export fetch failed. Fatal for the session.
    #[error("Could not connect to {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: FetchError,
    },

    /// Something about a whole page made no sense; nothing partial is returned.
    #[error("An error occurred processing {url}: {context}")]
    Parse { url: String, context: String },

    /// The ratings export came back but was not readable as CSV.
    #[error("Could not read ratings export {url}: {source}")]
    Export {
        url: String,
        #[source]
        source: csv::Error,
    },
}

impl ScrapeError {
    pub fn network(url: impl Into<String>, source: FetchError) -> Self {
        ScrapeError::Network { url: url.into(), source }
    }

    pub fn parse(url: impl Into<String>, context: impl Into<String>) -> Self {
        ScrapeError::Parse { url: url.into(), context: context.into() }
    }

    /// The URL involved, where there is one.
    pub fn url(&self) -> Option<&str> {
        match self {
            ScrapeError::Network { url, .. }
            | ScrapeError::Parse { url, .. }
            | ScrapeError::Export { url, .. } => Some(url),
            ScrapeError::IdentityNotFound | ScrapeError::NotSignedIn => None,
        }
    }
}
