//! Field-level filters and signal extractors for search results.
//!
//! Each submodule owns one decision applied to a raw search-result entry:
//!
//! | Module | Decision |
//! |--------|----------|
//! | [`recency`] | Is the entry's relative date inside the lookback window? |
//! | [`category`] | Does one of the entry's tags match the target category? |
//! | [`signals`] | Money mention and search-phrase occurrence count |
//! | [`style`] | Image URL embedded in a CSS `style` attribute |
//!
//! All of these are fail-soft: unparseable or missing input is logged and
//! produces the safe default (false, zero, or `None`) rather than an error.
//! Partial data out of a run beats no run at all.

pub mod category;
pub mod recency;
pub mod signals;
pub mod style;
