// src/data.rs
//
// The record shape shared by reviews and ratings, plus the per-session result.
//
// - Identity:   who we are scraping for; resolved once per session.
// - Record:     one review or rating. `subject` is never empty.
// - PageResult: head + records in site order; handed back by value when a
//               session ends, so nothing can append to it afterwards.
// - Datasets:   what a full run exports (both result sets + schema tag).

use serde::{Deserialize, Serialize};

use crate::config::consts::{SCHEMA_KEY, SCHEMA_VERSION};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "reviewerID")]
    pub reviewer_id: String,
    #[serde(rename = "reviewerName", default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
}

impl Identity {
    pub fn new(reviewer_id: impl Into<String>, reviewer_name: Option<String>) -> Self {
        Self { reviewer_id: reviewer_id.into(), reviewer_name }
    }

    /// Ratings column header used in someone else's export: "<name> rated".
    pub fn rated_column(&self) -> Option<String> {
        self.reviewer_name.as_ref().map(|n| join!(n.as_str(), " rated"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub subject: String,
    #[serde(rename = "subjectIMDBURL")]
    pub subject_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoilers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub head: Identity,
    pub data: Vec<Record>,
}

impl PageResult {
    pub fn new(head: Identity) -> Self {
        Self { head, data: Vec::new() }
    }
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataKind {
    Reviews,
    Ratings,
}

impl DataKind {
    pub fn name(&self) -> &'static str {
        match self {
            DataKind::Reviews => "reviews",
            DataKind::Ratings => "ratings",
        }
    }

    /// Column order for tabular export.
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            DataKind::Reviews => &[
                "subject", "subjectIMDBURL", "title", "date", "starRating", "spoilers", "text",
            ],
            DataKind::Ratings => &["subject", "subjectIMDBURL", "starRating", "datePosted"],
        }
    }

    /// One tabular row, same order as `headers()`. Absent fields are blank.
    pub fn row(&self, r: &Record) -> Vec<String> {
        let o = |v: &Option<String>| v.clone().unwrap_or_default();
        match self {
            DataKind::Reviews => vec![
                r.subject.clone(),
                r.subject_url.clone(),
                o(&r.title),
                o(&r.date),
                o(&r.star_rating),
                r.spoilers.map(|b| b.to_string()).unwrap_or_default(),
                o(&r.text),
            ],
            DataKind::Ratings => vec![
                r.subject.clone(),
                r.subject_url.clone(),
                o(&r.star_rating),
                o(&r.date_posted),
            ],
        }
    }
}

/// Export object for a run: whichever sets were retrieved, tagged with the schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasets {
    pub schema_key: String,
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<PageResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<PageResult>,
}

impl Default for Datasets {
    fn default() -> Self {
        Self {
            schema_key: s!(SCHEMA_KEY),
            schema_version: s!(SCHEMA_VERSION),
            reviews: None,
            ratings: None,
        }
    }
}

impl Datasets {
    /// Present sets, in export order.
    pub fn iter(&self) -> impl Iterator<Item = (DataKind, &PageResult)> {
        [
            (DataKind::Reviews, self.reviews.as_ref()),
            (DataKind::Ratings, self.ratings.as_ref()),
        ]
        .into_iter()
        .filter_map(|(k, r)| r.map(|r| (k, r)))
    }
}
