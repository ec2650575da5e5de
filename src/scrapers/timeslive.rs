//! TimesLIVE search adapter.
//!
//! Fetches the [TimesLIVE](https://www.timeslive.co.za) search page for a
//! phrase and slices the rendered result list into owned
//! [`HtmlResult`] handles for the pipeline.
//!
//! # Markup
//!
//! The search page renders results as:
//!
//! ```text
//! div.result-set
//! └── a.result            (href = article URL)
//!     ├── h2              (title)
//!     ├── p               (description)
//!     ├── div.date-stamp  ("3 days ago")
//!     ├── div.section
//!     │   └── span[rel]   (category tags)
//!     └── span.image      (style carries background-image:url(...))
//! ```
//!
//! A response without the `div.result-set` container is an error here; the
//! caller decides how softly to land (the task loop logs it and treats the
//! run as empty).

use crate::page::{HtmlResult, ResultLocators, SearchResult};
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

const SEARCH_URL: &str = "https://www.timeslive.co.za/search/";

const RESULT_SET: &str = "div.result-set";
const RESULT_ITEM: &str = "div.result-set > a.result";

/// Field locators within one `a.result` entry.
pub const RESULT_LOCATORS: ResultLocators = ResultLocators {
    title: "h2",
    description: "p",
    date: "div.date-stamp",
    category: "div.section span[rel]",
    image: "span.image",
};

/// HTTP client for the TimesLIVE search page.
pub struct TimesLiveClient {
    http: reqwest::Client,
    search_url: Url,
}

impl TimesLiveClient {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(concat!(
                    env!("CARGO_PKG_NAME"),
                    "/",
                    env!("CARGO_PKG_VERSION")
                ))
                .build()?,
            search_url: Url::parse(SEARCH_URL)?,
        })
    }

    /// Perform a search and return one handle per rendered result.
    ///
    /// # Errors
    ///
    /// Fails if the request fails or the response carries no result-set
    /// container (a redesigned page, a block page, or an outage — all cases
    /// where scraping on blindly would only produce garbage).
    #[instrument(level = "info", skip(self))]
    pub async fn search_news(
        &self,
        search_phrase: &str,
    ) -> Result<Vec<Box<dyn SearchResult>>, Box<dyn Error>> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", search_phrase);

        debug!(%url, "Fetching search page");
        let html = self.http.get(url).send().await?.error_for_status()?.text().await?;

        let results = parse_results(&html)?;
        info!(count = results.len(), "Indexed search results");
        Ok(results)
    }
}

/// Slice a search page into per-result handles.
///
/// Each `a.result` under the result set becomes an [`HtmlResult`] owning its
/// outer HTML. An empty result set is a successful empty search; a missing
/// result-set container is an error.
pub fn parse_results(html: &str) -> Result<Vec<Box<dyn SearchResult>>, Box<dyn Error>> {
    let document = Html::parse_document(html);

    let result_set = Selector::parse(RESULT_SET).unwrap();
    if document.select(&result_set).next().is_none() {
        return Err(format!("search page has no '{RESULT_SET}' container").into());
    }

    let result_item = Selector::parse(RESULT_ITEM).unwrap();
    Ok(document
        .select(&result_item)
        .map(|element| Box::new(HtmlResult::new(element.html())) as Box<dyn SearchResult>)
        .collect())
}
