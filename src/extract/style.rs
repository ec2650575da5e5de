//! Image URL extraction from inline CSS.
//!
//! The search page renders result thumbnails as `background-image` styles,
//! so the image URL has to be fished out of the element's `style` attribute
//! rather than an `src`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// The argument of a CSS `url(...)` call, with optional double quotes.
static URL_IN_STYLE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"url\("?([^"?]+)"?\)"#).unwrap());

/// Extract the URL from the first `url(...)` in a style attribute.
///
/// Returns `None` when the attribute is absent, empty, or contains no
/// `url(...)` call.
pub fn image_url_from_style(style_attribute: Option<&str>) -> Option<String> {
    let style = style_attribute?;
    if style.is_empty() {
        return None;
    }

    let url = URL_IN_STYLE
        .captures(style)
        .map(|captures| captures[1].to_string());
    debug!(?url, "Parsed image URL from style attribute");
    url
}
