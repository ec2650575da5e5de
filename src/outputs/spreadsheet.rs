//! CSV persistence for extracted records.
//!
//! Each extraction pass writes one file named with the run timestamp:
//!
//! ```text
//! {output_dir}/news_data_2024-06-15_12-30-05.csv
//! ```
//!
//! Columns, in order: `title`, `description`, `date`, `image_file_name`,
//! `search_phrase_occurrences`, `contains_money_mention`. Fields are quoted
//! per RFC 4180 when they contain commas, quotes, or line breaks.

use crate::models::ExtractedNewsItem;
use crate::pipeline::RecordSink;
use crate::utils::csv_field;
use chrono::Local;
use std::error::Error;
use std::fmt::Write as _;
use tokio::fs;
use tracing::{error, info, instrument};

const HEADER: &str =
    "title,description,date,image_file_name,search_phrase_occurrences,contains_money_mention";

/// [`RecordSink`] writing one timestamped CSV per run into a fixed directory.
pub struct SpreadsheetSink {
    output_dir: String,
}

impl SpreadsheetSink {
    pub fn new(output_dir: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

/// Render the full CSV document for one run's records.
fn render_csv(records: &[ExtractedNewsItem]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for record in records {
        writeln!(
            csv,
            "{},{},{},{},{},{}",
            csv_field(&record.title),
            csv_field(&record.description),
            csv_field(&record.date),
            csv_field(&record.image_file_name),
            record.search_phrase_occurrences,
            record.contains_money_mention,
        )
        .unwrap();
    }

    csv
}

impl SpreadsheetSink {
    async fn write(&self, records: &[ExtractedNewsItem]) -> Result<String, Box<dyn Error>> {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = format!("{}/news_data_{}.csv", self.output_dir, timestamp);

        fs::write(&path, render_csv(records)).await?;
        Ok(path)
    }
}

impl RecordSink for SpreadsheetSink {
    /// Persist `records`, returning the written path or `None` on failure.
    #[instrument(level = "info", skip_all, fields(count = records.len()))]
    async fn persist(&self, records: &[ExtractedNewsItem]) -> Option<String> {
        match self.write(records).await {
            Ok(path) => {
                info!(%path, "Data saved to spreadsheet successfully");
                Some(path)
            }
            Err(e) => {
                error!(error = %e, "Failed to save data to spreadsheet");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, description: &str) -> ExtractedNewsItem {
        ExtractedNewsItem {
            title: title.to_string(),
            description: description.to_string(),
            date: "3 days ago".to_string(),
            image_file_name: "pic.jpg.png".to_string(),
            search_phrase_occurrences: 1,
            contains_money_mention: false,
        }
    }

    #[test]
    fn test_render_header_only_for_empty_run() {
        assert_eq!(render_csv(&[]), format!("{HEADER}\n"));
    }

    #[test]
    fn test_render_one_row_per_record() {
        let csv = render_csv(&[record("Tariffs up", "Prices rose."), record("Two", "More.")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "Tariffs up,Prices rose.,3 days ago,pic.jpg.png,1,false");
    }

    #[test]
    fn test_render_quotes_awkward_fields() {
        let csv = render_csv(&[record(r#"He said "up, not down""#, "a,b")]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with(r#""He said ""up, not down""","a,b","#));
    }

    #[tokio::test]
    async fn test_persist_writes_timestamped_file() {
        let dir = std::env::temp_dir().join("news_search_bot_sink_test");
        std::fs::create_dir_all(&dir).unwrap();
        let sink = SpreadsheetSink::new(dir.to_str().unwrap());

        let path = sink.persist(&[record("T", "D")]).await.unwrap();
        assert!(path.contains("news_data_"));
        assert!(path.ends_with(".csv"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with(HEADER));
        assert!(contents.contains("T,D,3 days ago"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_persist_into_missing_dir_is_none() {
        let sink = SpreadsheetSink::new("/nonexistent/deeply/missing");
        assert!(sink.persist(&[record("T", "D")]).await.is_none());
    }
}
