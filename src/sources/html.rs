//! Small helpers shared by the per-site HTML extractors

use crate::{SourceError, SourceResult};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Compiles a CSS selector
pub fn selector(css: &str) -> SourceResult<Selector> {
    Selector::parse(css).map_err(|e| SourceError::Selector(format!("'{}': {:?}", css, e)))
}

/// Returns true if the document contains at least one element matching `css`
///
/// Used to tell a genuine results page from a parked or placeholder page.
pub fn has_marker(body: &str, css: &str) -> bool {
    let Ok(marker) = Selector::parse(css) else {
        return false;
    };
    let document = Html::parse_document(body);
    let found = document.select(&marker).next().is_some();
    found
}

/// Concatenated text of an element, with non-breaking spaces normalized
pub fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .replace('\u{a0}', " ")
}

/// Trimmed text of the `n`th descendant matching `selector`, empty if absent
pub fn nth_text(row: ElementRef<'_>, selector: &Selector, n: usize) -> String {
    row.select(selector)
        .nth(n)
        .map(|el| text_of(el).trim().to_string())
        .unwrap_or_default()
}

/// `href` of the `n`th descendant matching `selector`
pub fn nth_href<'a>(row: ElementRef<'a>, selector: &Selector, n: usize) -> Option<&'a str> {
    row.select(selector)
        .nth(n)
        .and_then(|el| el.value().attr("href"))
}

/// Resolves a link against the site base address
///
/// Returns None for empty hrefs and links that cannot be resolved.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base_url.join(href).ok().map(|url| url.to_string())
}

/// Direct element children of `element`, skipping text and comment nodes
pub fn element_children(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap)
}
