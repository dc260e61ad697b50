//! # Scraping “specs” module
//!
//! Page-specific knowledge of the site: *where the data lives in the HTML* and
//! *how to pull it out without tripping over irregular markup*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of one page at a time (`comments-expanded`, any page's
//!   navigation bar).
//! - **Selector choice & precedence** (e.g. the second `<small>` is the date when
//!   a helpfulness line is present).
//! - **Tolerant extraction**: an entry that can't be read is dropped and counted,
//!   never turned into a half-filled record.
//!
//! ## What does **not** live here
//! - **Fetching, pagination, cycle detection** – `scrape::*`.
//! - **Export formatting** – `file` / `csv`.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::retrieve_* → ReviewsSession::run → specs::reviews::parse_page
//!                                                  ↘ specs::entry::FieldExtractor
//! ```
//!
//! ## Conventions & invariants
//! - The parsed tree is never mutated: entries are split up front and walked.
//! - Every record has a non-empty subject; dates are ISO or absent.
//! - Specs are testable **offline** against inline HTML snippets.
pub mod entry;
pub mod profile;
pub mod reviews;
