//! Category tag matching.
//!
//! Each search result carries a row of section tags; a result is kept only
//! when one of them equals the requested category. The comparison trims and
//! lowercases both sides, nothing fuzzier than that.

use crate::page::SearchResult;
use tracing::{debug, error};

/// True iff one of `tag_handles` carries a `rel` attribute equal to
/// `news_category`, comparing trimmed and lowercased.
///
/// An empty tag list never matches. The check fails closed: if any single
/// tag's attribute cannot be read the whole result is treated as
/// non-matching, rather than matching on the tags that did read.
pub fn category_matches(tag_handles: &[Box<dyn SearchResult>], news_category: &str) -> bool {
    let mut categories = Vec::with_capacity(tag_handles.len());

    for handle in tag_handles {
        match handle.attr("", "rel") {
            Ok(Some(value)) => categories.push(value.trim().to_lowercase()),
            Ok(None) => {
                error!("Category tag has no rel attribute; failing category check");
                return false;
            }
            Err(e) => {
                error!(error = %e, "Error reading category tag; failing category check");
                return false;
            }
        }
    }

    let target = news_category.trim().to_lowercase();
    let matched = categories.iter().any(|category| *category == target);
    debug!(%target, ?categories, matched, "Evaluated category match");
    matched
}
