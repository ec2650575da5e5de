//! Utility functions for file naming, CSV escaping, and output validation.
//!
//! Small helpers shared across the pipeline and the output writers:
//! - Image file-name derivation from a URL
//! - RFC-4180 field escaping for the spreadsheet writer
//! - String truncation for logging
//! - File system validation for the output directory

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Derive the file name an image is saved under.
///
/// Takes the basename of the URL path and appends `.png` unconditionally, so
/// `https://cdn.example.com/pic.jpg` becomes `pic.jpg.png`. The double
/// extension is deliberate and matches what the export records; downstream
/// consumers key on this exact name.
pub fn image_file_name(image_url: &str) -> String {
    let basename = image_url.rsplit('/').next().unwrap_or(image_url);
    format!("{basename}.png")
}

/// Escape one field for a CSV row.
///
/// Fields containing a comma, double quote, or line break are wrapped in
/// double quotes with inner quotes doubled; anything else passes through
/// unchanged.
pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes with an ellipsis and
/// byte count indicator appended. Site text carries curly quotes and accented
/// names, so the cut is floored to the previous character boundary rather
/// than sliced at a raw byte offset.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file. Run before any extraction
/// so a bad output path fails the run up front instead of after the scrape.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
