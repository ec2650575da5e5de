//! Rendered-page result handles.
//!
//! The filtering pipeline never touches the network or a DOM directly; it
//! works against the [`SearchResult`] trait, which models one rendered
//! search-result entry with three capabilities:
//!
//! - text of a descendant element ([`SearchResult::text`])
//! - an attribute of the entry or a descendant ([`SearchResult::attr`])
//! - descendant entries, for category tag lists ([`SearchResult::children`])
//!
//! Locators are CSS selector strings, relative to the entry. The empty
//! locator addresses the entry's own element, which is how the entry's
//! `href` is read.
//!
//! [`HtmlResult`] is the production implementation: it owns one entry's HTML
//! fragment as a plain string and re-parses it with `scraper` per lookup.
//! Owning a string (rather than a live `scraper` node) keeps handles `Send`
//! and lets unit tests fabricate entries from literal HTML without any page
//! fetch.

use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::fmt;

/// Failure to resolve a locator against a result entry.
///
/// Covers both unparseable selectors and selectors that match nothing. The
/// pipeline treats any `PageError` on a field lookup as grounds to skip that
/// single entry.
#[derive(Debug)]
pub struct PageError {
    message: String,
}

impl PageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for PageError {}

/// Where each field of a search-result entry lives, as CSS locators
/// relative to the entry.
///
/// The pipeline is written against this struct so its field extraction is
/// independent of any one site's markup; the production set for the target
/// site lives in the scraper module.
#[derive(Debug, Clone, Copy)]
pub struct ResultLocators {
    /// The headline element.
    pub title: &'static str,
    /// The summary paragraph.
    pub description: &'static str,
    /// The relative-date stamp.
    pub date: &'static str,
    /// Category tag elements, each carrying a `rel` attribute.
    pub category: &'static str,
    /// The thumbnail element whose `style` embeds the image URL.
    pub image: &'static str,
}

/// One rendered search-result entry.
///
/// Implementations expose just enough of the rendered page for the pipeline
/// to pull fields out of an entry; they never expose navigation. All methods
/// take CSS selector locators relative to the entry. The empty locator
/// addresses the entry's own element.
pub trait SearchResult {
    /// Text content of the first element matching `locator`.
    fn text(&self, locator: &str) -> Result<String, PageError>;

    /// Value of attribute `name` on the first element matching `locator`,
    /// or `None` if the element exists but carries no such attribute.
    fn attr(&self, locator: &str, name: &str) -> Result<Option<String>, PageError>;

    /// All elements matching `locator`, each wrapped as its own handle.
    fn children(&self, locator: &str) -> Result<Vec<Box<dyn SearchResult>>, PageError>;
}

/// A [`SearchResult`] backed by an owned HTML fragment.
pub struct HtmlResult {
    html: String,
}

impl HtmlResult {
    /// Wrap one entry's outer HTML.
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    fn parse_locator(locator: &str) -> Result<Selector, PageError> {
        Selector::parse(locator)
            .map_err(|e| PageError::new(format!("bad locator '{locator}': {e}")))
    }

    /// Run `f` against the element the locator resolves to.
    ///
    /// The fragment is parsed fresh per lookup; `scraper::Html` is not kept
    /// on the handle so the handle stays `Send`.
    fn with_element<T>(
        &self,
        locator: &str,
        f: impl FnOnce(ElementRef<'_>) -> T,
    ) -> Result<T, PageError> {
        let document = Html::parse_fragment(&self.html);

        if locator.is_empty() {
            return fragment_root(&document)
                .map(f)
                .ok_or_else(|| PageError::new("fragment has no root element"));
        }

        let selector = Self::parse_locator(locator)?;
        document
            .select(&selector)
            .next()
            .map(f)
            .ok_or_else(|| PageError::new(format!("no element matches locator '{locator}'")))
    }
}

/// First real element under the fragment's synthetic `<html>` root.
fn fragment_root(document: &Html) -> Option<ElementRef<'_>> {
    document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .next()
}

impl SearchResult for HtmlResult {
    fn text(&self, locator: &str) -> Result<String, PageError> {
        self.with_element(locator, |element| {
            element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .trim()
                .to_string()
        })
    }

    fn attr(&self, locator: &str, name: &str) -> Result<Option<String>, PageError> {
        self.with_element(locator, |element| {
            element.value().attr(name).map(str::to_string)
        })
    }

    fn children(&self, locator: &str) -> Result<Vec<Box<dyn SearchResult>>, PageError> {
        let document = Html::parse_fragment(&self.html);
        let selector = Self::parse_locator(locator)?;

        Ok(document
            .select(&selector)
            .map(|element| Box::new(HtmlResult::new(element.html())) as Box<dyn SearchResult>)
            .collect())
    }
}
