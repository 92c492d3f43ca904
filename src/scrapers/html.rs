//! Small DOM helpers shared by the source adapters.

use crate::scrapers::traits::ExtractError;
use scraper::{ElementRef, Selector};
use url::Url;

pub fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::InvalidSelector(css.to_string()))
}

/// Text content with each text node trimmed and joined by single spaces
pub fn text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed text of the first match, `None` when absent or blank
pub fn first_text(scope: ElementRef<'_>, css: &str) -> Result<Option<String>, ExtractError> {
    let sel = selector(css)?;
    Ok(scope
        .select(&sel)
        .next()
        .map(text)
        .filter(|t| !t.is_empty()))
}

/// Direct text children only, so a wrapper div does not match its nested labels
pub fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.trim().to_string()))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First element matching `css` whose own text contains `needle`
pub fn find_labelled<'a>(
    scope: ElementRef<'a>,
    css: &str,
    needle: &str,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).find(|el| own_text(*el).contains(needle)))
}

pub fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Next element sibling, skipping text and comment nodes
pub fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Resolve a card link against the site root
pub fn absolute(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}
