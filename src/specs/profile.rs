// src/specs/profile.rs
//
// Who is signed in, read off any page's navigation bar:
//   #nb_personal a            href="/user/ur1234567/?ref_=nb_usr_prof_0"
//   #consumer_user_nav a      display name
//   #nblogin                  only has text when signed out

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::core::html::{self, static_selector};
use crate::data::Identity;

static PROFILE_LINK: LazyLock<Selector> = LazyLock::new(|| static_selector("#nb_personal a"));
static USER_NAV: LazyLock<Selector> = LazyLock::new(|| static_selector("#consumer_user_nav a"));
static LOGIN_PROMPT: LazyLock<Selector> = LazyLock::new(|| static_selector("#nblogin"));

static REVIEWER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/user/(ur[0-9]+)").expect("hardcoded regex pattern is valid"));

/// Reviewer id is required; name is optional.
pub fn extract_identity(doc: &Html) -> Option<Identity> {
    let href = doc
        .select(&PROFILE_LINK)
        .next()
        .and_then(|a| html::attr(&a, "href"))
        .unwrap_or("");
    let reviewer_id = REVIEWER_ID.captures(href)?.get(1)?.as_str();

    let reviewer_name = doc
        .select(&USER_NAV)
        .next()
        .and_then(|a| opt_s!(html::text_of(&a)));

    Some(Identity::new(reviewer_id, reviewer_name))
}

/// Parse-and-extract for callers holding raw text.
pub fn identity_from_html(page_html: &str) -> Option<Identity> {
    extract_identity(&Html::parse_document(page_html))
}

/// False when the sign-in prompt carries text.
pub fn signed_in(doc: &Html) -> bool {
    doc.select(&LOGIN_PROMPT)
        .next()
        .map(|el| html::text_of(&el).is_empty())
        .unwrap_or(true)
}

pub fn signed_in_html(page_html: &str) -> bool {
    signed_in(&Html::parse_document(page_html))
}
