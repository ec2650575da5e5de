//! The result-filtering pipeline.
//!
//! [`ResultFilterPipeline`] drives one full extraction pass over a sequence
//! of rendered search-result entries: recency filter, category filter, image
//! retrieval, signal extraction, persistence. It owns none of the I/O — image
//! downloads and record persistence go through the [`ImageFetcher`] and
//! [`RecordSink`] collaborator traits, and page access goes through
//! [`SearchResult`] handles — so the whole pass runs against in-memory fakes
//! in tests.
//!
//! # Failure isolation
//!
//! Records are processed independently and sequentially. A field that fails
//! to extract skips that one record; a failed image download still produces
//! the textual record; a failed persist still returns the collection to the
//! caller. Nothing in a single record can abort the batch.

use crate::extract::category::category_matches;
use crate::extract::recency::{published_within, RecencyWindow};
use crate::extract::signals::{contains_money_mention, count_phrase_occurrences};
use crate::extract::style::image_url_from_style;
use crate::models::ExtractedNewsItem;
use crate::page::{PageError, ResultLocators, SearchResult};
use crate::utils::{image_file_name, truncate_for_log};
use chrono::{DateTime, Local};
use tracing::{debug, error, info, instrument, warn};

/// Collaborator that fetches an image and writes it to disk.
///
/// Fire-and-forget per record: implementations log their own failures and
/// report success as a bool, and the pipeline never retries.
pub trait ImageFetcher {
    async fn download_image(&self, image_url: &str, destination: &str) -> bool;
}

/// Collaborator that persists one run's extracted records.
///
/// Returns the written file path, or `None` on failure (logged by the
/// implementation). Persistence failure never blocks the records being
/// returned to the caller.
pub trait RecordSink {
    async fn persist(&self, records: &[ExtractedNewsItem]) -> Option<String>;
}

/// One extraction pass over a search page's result entries.
pub struct ResultFilterPipeline<'a, F, S> {
    images: &'a F,
    sink: &'a S,
    /// Directory image files are written into.
    output_dir: &'a str,
    /// Frozen at construction so every record in a pass is judged against
    /// the same instant.
    now: DateTime<Local>,
    locators: ResultLocators,
}

impl<'a, F, S> ResultFilterPipeline<'a, F, S>
where
    F: ImageFetcher,
    S: RecordSink,
{
    pub fn new(
        images: &'a F,
        sink: &'a S,
        output_dir: &'a str,
        now: DateTime<Local>,
        locators: ResultLocators,
    ) -> Self {
        Self {
            images,
            sink,
            output_dir,
            now,
            locators,
        }
    }

    /// Filter `results` down to the entries matching the recency window and
    /// category, extract their fields and signals, persist the collection,
    /// and return it.
    ///
    /// `months_back` of 0 is normalized to 1. Every per-record failure is
    /// logged and skips only that record; the returned collection holds
    /// everything that survived.
    #[instrument(level = "info", skip_all, fields(%search_phrase, months_back, %news_category, result_count = results.len()))]
    pub async fn extract_news_data(
        &self,
        results: &[Box<dyn SearchResult>],
        search_phrase: &str,
        months_back: u32,
        news_category: &str,
    ) -> Vec<ExtractedNewsItem> {
        let window = RecencyWindow::new(months_back);
        debug!(
            months_back = window.months_back(),
            max_age_days = window.max_age_days(),
            "Recency window normalized"
        );
        let mut news_data = Vec::new();

        for (index, result) in results.iter().enumerate() {
            match self
                .process_result(result.as_ref(), search_phrase, &window, news_category)
                .await
            {
                Ok(Some(item)) => {
                    debug!(index, title = %truncate_for_log(&item.title, 80), "Record kept");
                    news_data.push(item);
                }
                Ok(None) => debug!(index, "Record filtered out"),
                Err(e) => error!(index, error = %e, "Error extracting data from result; skipping"),
            }
        }

        info!(
            kept = news_data.len(),
            scanned = results.len(),
            "Extraction pass complete"
        );

        match self.sink.persist(&news_data).await {
            Some(path) => info!(%path, "Persisted extracted records"),
            None => error!("Failed to persist extracted records"),
        }

        news_data
    }

    /// Process one entry: `Ok(None)` means it was filtered out, `Err` means
    /// a field failed to extract and the entry is skipped.
    async fn process_result(
        &self,
        result: &dyn SearchResult,
        search_phrase: &str,
        window: &RecencyWindow,
        news_category: &str,
    ) -> Result<Option<ExtractedNewsItem>, PageError> {
        let title = result.text(self.locators.title)?;
        let url = result.attr("", "href")?;
        let description = result.text(self.locators.description)?;
        let date = result.text(self.locators.date)?;
        debug!(%title, ?url, %date, "Extracted result fields");

        if !published_within(&date, self.now, window) {
            return Ok(None);
        }

        let tag_handles = result.children(self.locators.category)?;
        if !category_matches(&tag_handles, news_category) {
            return Ok(None);
        }

        let style = result.attr(self.locators.image, "style")?;
        let Some(image_url) = image_url_from_style(style.as_deref()) else {
            return Err(PageError::new("no image URL in style attribute"));
        };

        let file_name = image_file_name(&image_url);
        let destination = format!("{}/{}", self.output_dir, file_name);
        if !self.images.download_image(&image_url, &destination).await {
            warn!(%image_url, "Image download failed; keeping textual record");
        }

        Ok(Some(ExtractedNewsItem {
            search_phrase_occurrences: count_phrase_occurrences(
                search_phrase,
                &title,
                &description,
            ),
            contains_money_mention: contains_money_mention(&title, &description),
            title,
            description,
            date,
            image_file_name: file_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlResult;
    use chrono::TimeZone;
    use std::sync::Mutex;

    const TEST_LOCATORS: ResultLocators = ResultLocators {
        title: "h2",
        description: "p",
        date: "div.date-stamp",
        category: "div.section span[rel]",
        image: "span.image",
    };

    struct FakeFetcher {
        succeed: bool,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeFetcher {
        fn new(succeed: bool) -> Self {
            Self {
                succeed,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ImageFetcher for FakeFetcher {
        async fn download_image(&self, image_url: &str, destination: &str) -> bool {
            self.calls
                .lock()
                .unwrap()
                .push((image_url.to_string(), destination.to_string()));
            self.succeed
        }
    }

    struct RecordingSink {
        batches: Mutex<Vec<Vec<ExtractedNewsItem>>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
            }
        }
    }

    impl RecordSink for RecordingSink {
        async fn persist(&self, records: &[ExtractedNewsItem]) -> Option<String> {
            self.batches.lock().unwrap().push(records.to_vec());
            Some("output/news_data_test.csv".to_string())
        }
    }

    fn frozen_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn entry(title: &str, description: &str, date: &str, category: &str, image: &str) -> String {
        format!(
            concat!(
                r#"<a class="result" href="https://example.com/{slug}">"#,
                "<h2>{title}</h2>",
                "<p>{description}</p>",
                r#"<div class="date-stamp">{date}</div>"#,
                r#"<div class="section"><span rel="{category}">{category}</span></div>"#,
                r#"<span class="image" style="background-image:url(&quot;{image}&quot;)"></span>"#,
                "</a>"
            ),
            slug = title.to_lowercase().replace(' ', "-"),
            title = title,
            description = description,
            date = date,
            category = category,
            image = image,
        )
    }

    fn handles(html: Vec<String>) -> Vec<Box<dyn SearchResult>> {
        html.into_iter()
            .map(|h| Box::new(HtmlResult::new(h)) as Box<dyn SearchResult>)
            .collect()
    }

    #[tokio::test]
    async fn test_only_passing_record_survives() {
        let results = handles(vec![
            entry(
                "Eskom tariff hike",
                "Eskom wants R300 more.",
                "3 days ago",
                "news",
                "https://cdn.example.com/eskom.jpg",
            ),
            // Too old.
            entry(
                "Old eskom story",
                "Archive.",
                "2 years ago",
                "news",
                "https://cdn.example.com/old.jpg",
            ),
            // Wrong category.
            entry(
                "Eskom on the pitch",
                "Football.",
                "1 day ago",
                "sport",
                "https://cdn.example.com/pitch.jpg",
            ),
        ]);

        let fetcher = FakeFetcher::new(true);
        let sink = RecordingSink::new();
        let pipeline =
            ResultFilterPipeline::new(&fetcher, &sink, "output", frozen_now(), TEST_LOCATORS);

        let items = pipeline
            .extract_news_data(&results, "eskom", 1, "news")
            .await;

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title, "Eskom tariff hike");
        assert_eq!(item.date, "3 days ago");
        assert_eq!(item.image_file_name, "eskom.jpg.png");
        assert_eq!(item.search_phrase_occurrences, 2);
        assert!(item.contains_money_mention);

        // Persistence saw exactly the one-element collection.
        let batches = sink.batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 1);
        assert_eq!(batches[0][0], *item);

        // Only the passing record's image was fetched, into the output dir.
        let calls = fetcher.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://cdn.example.com/eskom.jpg");
        assert_eq!(calls[0].1, "output/eskom.jpg.png");
    }

    #[tokio::test]
    async fn test_zero_months_back_is_normalized_to_one() {
        let results = handles(vec![
            entry(
                "Fresh",
                "d",
                "29 days ago",
                "news",
                "https://x/fresh.jpg",
            ),
            entry("Stale", "d", "31 days ago", "news", "https://x/stale.jpg"),
        ]);

        let fetcher = FakeFetcher::new(true);
        let sink = RecordingSink::new();
        let pipeline =
            ResultFilterPipeline::new(&fetcher, &sink, "output", frozen_now(), TEST_LOCATORS);

        let items = pipeline.extract_news_data(&results, "x", 0, "news").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Fresh");
    }

    #[tokio::test]
    async fn test_broken_record_skipped_batch_continues() {
        // First record has no date stamp at all; second is fine.
        let broken = r#"<a class="result" href="https://x/broken"><h2>Broken</h2><p>d</p></a>"#;
        let results = handles(vec![
            broken.to_string(),
            entry("Fine", "d", "1 day ago", "news", "https://x/fine.jpg"),
        ]);

        let fetcher = FakeFetcher::new(true);
        let sink = RecordingSink::new();
        let pipeline =
            ResultFilterPipeline::new(&fetcher, &sink, "output", frozen_now(), TEST_LOCATORS);

        let items = pipeline.extract_news_data(&results, "x", 1, "news").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Fine");
    }

    #[tokio::test]
    async fn test_record_without_image_url_is_skipped() {
        let no_url = concat!(
            r#"<a class="result" href="https://x/a"><h2>T</h2><p>d</p>"#,
            r#"<div class="date-stamp">1 day ago</div>"#,
            r#"<div class="section"><span rel="news">News</span></div>"#,
            r#"<span class="image" style="color: red"></span></a>"#
        );
        let results = handles(vec![no_url.to_string()]);

        let fetcher = FakeFetcher::new(true);
        let sink = RecordingSink::new();
        let pipeline =
            ResultFilterPipeline::new(&fetcher, &sink, "output", frozen_now(), TEST_LOCATORS);

        let items = pipeline.extract_news_data(&results, "x", 1, "news").await;
        assert!(items.is_empty());
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_download_failure_still_appends_record() {
        let results = handles(vec![entry(
            "Kept anyway",
            "d",
            "1 day ago",
            "news",
            "https://x/gone.jpg",
        )]);

        let fetcher = FakeFetcher::new(false);
        let sink = RecordingSink::new();
        let pipeline =
            ResultFilterPipeline::new(&fetcher, &sink, "output", frozen_now(), TEST_LOCATORS);

        let items = pipeline.extract_news_data(&results, "x", 1, "news").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image_file_name, "gone.jpg.png");
    }

    #[tokio::test]
    async fn test_repeat_run_is_identical() {
        let make = || {
            handles(vec![entry(
                "Stable",
                "R50 fee",
                "2 weeks ago",
                "news",
                "https://x/s.jpg",
            )])
        };

        let fetcher = FakeFetcher::new(true);
        let sink = RecordingSink::new();
        let pipeline =
            ResultFilterPipeline::new(&fetcher, &sink, "output", frozen_now(), TEST_LOCATORS);

        let first = pipeline
            .extract_news_data(&make(), "stable", 1, "news")
            .await;
        let second = pipeline
            .extract_news_data(&make(), "stable", 1, "news")
            .await;
        assert_eq!(first, second);
    }
}
