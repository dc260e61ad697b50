// src/core/html.rs
//
// Small helpers over `scraper`'s immutable tree. Tag matching is on the
// parsed element name, so case and attribute order in the source don't matter.

use scraper::{ElementRef, Selector};

use super::sanitize::normalize_ws;

/// Compile a selector known at build time.
/// Only for literals; a bad literal is a bug, not a page problem.
pub fn static_selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad selector {css:?}: {e}"))
}

#[inline]
pub fn is_tag(el: &ElementRef<'_>, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// Visible text of an element, whitespace collapsed.
pub fn text_of(el: &ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn attr<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// First descendant element (not self) with the given tag.
pub fn first_descendant<'a>(el: &ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|d| is_tag(d, tag))
}

/// Does any descendant element (not self) carry this tag?
pub fn has_descendant(el: &ElementRef<'_>, tag: &str) -> bool {
    first_descendant(el, tag).is_some()
}

/// Following sibling elements; text and comment nodes are skipped.
pub fn next_sibling_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// Parent element, if the parent is an element (not the document).
pub fn parent_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}
