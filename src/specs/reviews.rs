// src/specs/reviews.rs
//
// The "comments-expanded" page: a list of review entries inside
// `table#outerbody`, a pager table with arrow images, and a
// "Page N of M" line in a <font>.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::entry::{EntryFragment, FieldExtractor};
use crate::core::html::{self, static_selector};
use crate::data::Record;

static ENTRY_HEADS: LazyLock<Selector> = LazyLock::new(|| static_selector("table#outerbody div"));
static PAGER_IMAGES: LazyLock<Selector> = LazyLock::new(|| static_selector("table table td a img"));
static PAGE_COUNT: LazyLock<Selector> = LazyLock::new(|| static_selector("table td font"));

static PAGE_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+.*?(\d+)").expect("hardcoded regex pattern is valid"));

/// What one page yields. Owns everything; the parsed tree is gone by now.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewsPage {
    pub records: Vec<Record>,
    /// Entries dropped because the extractor could not make sense of them.
    pub skipped: usize,
    /// Raw `href` of the "next" arrow, unresolved.
    pub next_href: Option<String>,
    pub total_pages: Option<u32>,
}

/// Split the page into entry fragments up front, in document order.
///
/// Each head div claims itself and every following sibling up to the next div
/// (an <hr> ends the entry's scope but not its claim). Divs inside something
/// already claimed are not heads of their own.
pub fn split_entries(doc: &Html) -> Vec<EntryFragment<'_>> {
    let mut claimed = HashSet::new();
    let mut out = Vec::new();

    for head in doc.select(&ENTRY_HEADS) {
        if claimed.contains(&head.id()) || head.ancestors().any(|a| claimed.contains(&a.id())) {
            continue;
        }
        claimed.insert(head.id());
        for sib in html::next_sibling_elements(head) {
            if html::is_tag(&sib, "div") {
                break;
            }
            claimed.insert(sib.id());
        }
        out.push(EntryFragment::from_head(head));
    }
    out
}

/// `href` of the link wrapping the last pager image, if any.
pub fn next_link(doc: &Html) -> Option<String> {
    let img = doc.select(&PAGER_IMAGES).last()?;
    let a = html::parent_element(&img).filter(|p| html::is_tag(p, "a"))?;
    opt_s!(html::attr(&a, "href").unwrap_or(""))
}

/// Best effort: second number of the first pager <font> ("Page 1 of 12" → 12).
pub fn total_pages(doc: &Html) -> Option<u32> {
    let font = doc.select(&PAGE_COUNT).next()?;
    let text = html::text_of(&font);
    PAGE_OF.captures(&text)?.get(1)?.as_str().parse().ok()
}

/// Extract everything from one page of HTML.
pub fn parse_page(page_html: &str, extractor: &FieldExtractor) -> ReviewsPage {
    let doc = Html::parse_document(page_html);
    let mut out = ReviewsPage::default();

    for frag in split_entries(&doc) {
        match extractor.extract(&frag) {
            Some(r) => out.records.push(r),
            None => out.skipped += 1,
        }
    }
    if out.skipped > 0 {
        debug!("skipped {} malformed entries", out.skipped);
    }

    out.next_href = next_link(&doc);
    out.total_pages = total_pages(&doc);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::default_site;

    fn page(entries: &str, pager: &str) -> String {
        format!(
            r#"<html><body>
            <table id="outerbody"><tr><td>
              <table><tr><td><font>Page 1 of 3</font></td>
                <td>{pager}</td></tr></table>
              {entries}
            </td></tr></table>
            </body></html>"#
        )
    }

    const TWO: &str = r#"
        <div><a href="/title/tt1/">One</a></div>
        <img alt="7/10"><b>First</b> <small>1 May 2010</small><p>a</p>
        <hr>
        <div><a href="/title/tt2/">Two</a></div>
        <b>Second</b> <small>2 May 2010</small><p>b</p>
        <hr>"#;

    #[test]
    fn splits_in_document_order() {
        let doc = Html::parse_document(&page(TWO, ""));
        let frags = split_entries(&doc);
        assert_eq!(frags.len(), 2);
        assert!(frags[0].scope.iter().all(|e| !html::is_tag(e, "hr")));
    }

    #[test]
    fn parses_records_next_and_total() {
        let pager = r#"<a href="comments-expanded?start=0"><img alt="prev"></a>
                       <a href="comments-expanded?start=10"><img alt="next"></a>"#;
        let out = parse_page(&page(TWO, pager), &FieldExtractor::new(default_site()));
        let subjects: Vec<_> = out.records.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["One", "Two"]);
        assert_eq!(out.records[0].star_rating.as_deref(), Some("7"));
        assert_eq!(out.next_href.as_deref(), Some("comments-expanded?start=10"));
        assert_eq!(out.total_pages, Some(3));
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn malformed_entry_is_skipped_not_fatal() {
        let entries = r#"
            <div>broken, no link</div><p>orphan</p><hr>
            <div><a href="/title/tt9/">Fine</a></div><p>ok</p>"#;
        let out = parse_page(&page(entries, ""), &FieldExtractor::new(default_site()));
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].subject, "Fine");
        assert_eq!(out.skipped, 1);
        assert_eq!(out.next_href, None);
    }

    #[test]
    fn nested_div_is_not_its_own_entry() {
        let entries = r#"
            <div><a href="/title/tt1/">Outer</a><div>inner</div></div><p>x</p>"#;
        let doc = Html::parse_document(&page(entries, ""));
        assert_eq!(split_entries(&doc).len(), 1);
    }

    #[test]
    fn image_not_in_a_link_means_no_next() {
        let doc = Html::parse_document(&page("", r#"<span><img alt="deco"></span>"#));
        assert_eq!(next_link(&doc), None);
    }

    #[test]
    fn no_page_count_is_fine() {
        let doc = Html::parse_document("<table><tr><td><font>Reviews</font></td></tr></table>");
        assert_eq!(total_pages(&doc), None);
    }
}
