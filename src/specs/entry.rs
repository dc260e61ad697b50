// src/specs/entry.rs
//
// One review entry → one Record.
//
// Markup of an entry on the comments-expanded page (siblings, not nested):
//
//   <div><a href="/title/tt0111161/">The Shawshank Redemption</a> (1994)</div>
//   <img src=… alt="8/10">
//   <b>Hope is a good thing</b>, <small>12 March 2019</small><br>
//   <small>5 of 8 people found the following review useful:</small>   (optional, sits first)
//   <p><b>*** This review may contain spoilers ***</b></p>            (optional)
//   <p>Body…</p>
//   <hr>
//
// The fragment is the head <div> plus the sibling elements after it, up to the
// next <div> or <hr>.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::core::{date, html};
use crate::data::Record;

static STAR_RATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/").expect("hardcoded regex pattern is valid"));

/// An entry's markup: head div + the elements that belong to it.
#[derive(Clone, Debug)]
pub struct EntryFragment<'a> {
    pub head: ElementRef<'a>,
    pub scope: Vec<ElementRef<'a>>,
}

impl<'a> EntryFragment<'a> {
    /// Build from a head div: take following siblings until `<div>` or `<hr>`.
    pub fn from_head(head: ElementRef<'a>) -> Self {
        let scope = html::next_sibling_elements(head)
            .take_while(|e| !html::is_tag(e, "div") && !html::is_tag(e, "hr"))
            .collect();
        Self { head, scope }
    }

    fn scope_tagged(&self, tag: &'static str) -> impl Iterator<Item = &ElementRef<'a>> {
        self.scope.iter().filter(move |e| html::is_tag(e, tag))
    }
}

/// Pulls Records out of entry fragments. Links are resolved against `site`.
#[derive(Clone, Debug)]
pub struct FieldExtractor {
    site: Url,
}

impl FieldExtractor {
    pub fn new(site: Url) -> Self {
        Self { site }
    }

    /// `None` when the subject link is missing or empty; the caller skips the entry.
    pub fn extract(&self, frag: &EntryFragment<'_>) -> Option<Record> {
        let (subject, subject_url) = match self.subject(&frag.head) {
            Some(s) => s,
            None => {
                debug!("entry without subject link skipped: {:.80}", frag.head.html());
                return None;
            }
        };

        let title = frag.scope_tagged("b").next().and_then(|b| opt_s!(html::text_of(b)));

        // "x of y people found this useful" comes first when present
        let smalls: Vec<_> = frag.scope_tagged("small").collect();
        let date_el = match smalls.len() {
            0 => None,
            1 => Some(smalls[0]),
            _ => Some(smalls[1]),
        };
        let date = date_el.and_then(|s| {
            let raw = html::text_of(s);
            let d = date::normalize(&raw);
            if d.is_none() && !raw.is_empty() {
                debug!("unparsed review date {raw:?} for {subject}");
            }
            d
        });

        // Spoiler marker: a bold run inside a body block. Those blocks are dropped.
        let spoilers = frag.scope.iter().any(|e| html::has_descendant(e, "b"));
        let text: String = frag
            .scope_tagged("p")
            .filter(|p| !html::has_descendant(p, "b"))
            .filter_map(|p| {
                let inner = p.inner_html();
                let inner = inner.trim();
                (!inner.is_empty()).then(|| join!("<p>", inner, "</p>"))
            })
            .collect();

        let star_rating = frag
            .scope_tagged("img")
            .next()
            .and_then(|img| html::attr(img, "alt"))
            .and_then(|alt| STAR_RATING.captures(alt))
            .map(|c| s!(&c[1]));

        Some(Record {
            subject,
            subject_url,
            title,
            date,
            text: opt_s!(text),
            star_rating,
            spoilers: Some(spoilers),
            date_posted: None,
        })
    }

    /// Parse a standalone entry snippet (head div first) and extract it.
    pub fn extract_html(&self, markup: &str) -> Option<Record> {
        let doc = Html::parse_fragment(markup);
        let head = doc
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|e| html::is_tag(e, "div"))?;
        self.extract(&EntryFragment::from_head(head))
    }

    fn subject(&self, head: &ElementRef<'_>) -> Option<(String, String)> {
        let a = html::first_descendant(head, "a")?;
        let subject = opt_s!(html::text_of(&a))?;
        let href = opt_s!(html::attr(&a, "href").unwrap_or(""))?;
        let url = self.site.join(&href).ok()?;
        Some((subject, s!(url.as_str())))
    }
}
