//! Site adapters that turn a search into result handles.
//!
//! Each adapter owns one site's URLs, markup selectors, and fetch logic, and
//! produces [`crate::page::SearchResult`] handles for the pipeline. The
//! pipeline itself never sees a URL or a selector beyond the locator set the
//! adapter exports.
//!
//! Currently the only adapter is [`timeslive`].

pub mod timeslive;
