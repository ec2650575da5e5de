//! Data models for search work items and extracted news records.
//!
//! This module defines the two structures that cross the crate's boundaries:
//! - [`WorkItem`]: One unit of work (phrase, window, category) supplied by the
//!   caller, either inline on the command line or from a JSON work-items file
//! - [`ExtractedNewsItem`]: One search result that survived the recency and
//!   category filters, with its textual signals computed
//!
//! Both are plain serde structs; neither has any lifecycle beyond
//! construction. An `ExtractedNewsItem` is write-once: the pipeline builds it,
//! appends it to the run's output collection, and hands the collection to the
//! persistence sink.

use serde::{Deserialize, Serialize};

/// One unit of work for the bot.
///
/// Mirrors the payload shape of the work-items file:
///
/// ```json
/// {
///   "search_phrase": "load shedding",
///   "num_months": 2,
///   "news_category": "news"
/// }
/// ```
///
/// A `num_months` of 0 is accepted and normalized to 1 by the pipeline's
/// recency window.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkItem {
    /// The phrase to search the site for.
    pub search_phrase: String,
    /// How many months back a result may be dated and still count.
    pub num_months: u32,
    /// The category a result must be tagged with.
    pub news_category: String,
}

/// A search result that passed both filters, in its final exported shape.
///
/// Field order matches the spreadsheet columns. The `date` field keeps the
/// site's raw relative-date text ("3 days ago") rather than a parsed
/// timestamp; recency was already decided during filtering and the raw text
/// is what the export preserves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedNewsItem {
    /// The result's headline text.
    pub title: String,
    /// The result's summary paragraph.
    pub description: String,
    /// The raw relative-date text as rendered on the search page.
    pub date: String,
    /// File name the result's image was saved under: the URL basename with
    /// `.png` appended unconditionally, whatever the URL's own extension.
    pub image_file_name: String,
    /// Non-overlapping, case-insensitive occurrences of the search phrase
    /// across title and description.
    pub search_phrase_occurrences: usize,
    /// Whether title or description mentions a monetary amount.
    pub contains_money_mention: bool,
}
