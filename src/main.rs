//! # News Search Bot
//!
//! Automates one chore: search a news site for a phrase, keep only the
//! results that are recent enough and tagged with the right category, and
//! export what survived — structured fields to a timestamped CSV, thumbnail
//! images to disk.
//!
//! ## Usage
//!
//! ```sh
//! news_search_bot -s "load shedding" -n 2 -c news
//! news_search_bot --work-items ./items.json
//! ```
//!
//! ## Architecture
//!
//! Each work item runs a two-phase pass:
//! 1. **Search**: the site adapter fetches the search page and slices it into
//!    per-result handles ([`scrapers::timeslive`])
//! 2. **Extract**: the pipeline filters the handles by recency and category,
//!    computes money/phrase signals, downloads images, and persists the
//!    records ([`pipeline`])
//!
//! The run is deliberately fail-soft end to end: a broken result skips that
//! result, a failed image download keeps the textual record, a failed search
//! skips that work item. Partial data beats an aborted run.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod extract;
mod models;
mod outputs;
mod page;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use models::WorkItem;
use outputs::images::HttpImageFetcher;
use outputs::spreadsheet::SpreadsheetSink;
use pipeline::ResultFilterPipeline;
use scrapers::timeslive::{self, TimesLiveClient};
use utils::ensure_writable_dir;

/// Resolve the run's work items: a JSON file if one was given, otherwise the
/// single inline item from the flags.
fn load_work_items(args: &Cli) -> Result<Vec<WorkItem>, Box<dyn Error>> {
    if let Some(ref path) = args.work_items {
        let json = std::fs::read_to_string(path)?;
        let items: Vec<WorkItem> = serde_json::from_str(&json)?;
        return Ok(items);
    }

    match (&args.search_phrase, &args.news_category) {
        (Some(search_phrase), Some(news_category)) => Ok(vec![WorkItem {
            search_phrase: search_phrase.clone(),
            num_months: args.num_months,
            news_category: news_category.clone(),
        }]),
        _ => Err("provide --work-items, or both --search-phrase and --news-category".into()),
    }
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_search_bot starting up");

    let args = Cli::parse();
    let work_items = load_work_items(&args)?;
    info!(count = work_items.len(), "Loaded work items");

    // Early check: the spreadsheet and every image land here.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = TimesLiveClient::new()?;
    let fetcher = HttpImageFetcher::new(reqwest::Client::new());
    let sink = SpreadsheetSink::new(args.output_dir.clone());

    for (index, item) in work_items.iter().enumerate() {
        info!(
            index,
            search_phrase = %item.search_phrase,
            num_months = item.num_months,
            news_category = %item.news_category,
            "Processing work item"
        );

        // A failed search skips this item only; later items still run.
        let results = match client.search_news(&item.search_phrase).await {
            Ok(results) => results,
            Err(e) => {
                error!(index, error = %e, "Search failed; skipping work item");
                continue;
            }
        };

        let pipeline = ResultFilterPipeline::new(
            &fetcher,
            &sink,
            &args.output_dir,
            Local::now(),
            timeslive::RESULT_LOCATORS,
        );
        let extracted = pipeline
            .extract_news_data(
                &results,
                &item.search_phrase,
                item.num_months,
                &item.news_category,
            )
            .await;

        info!(index, extracted = extracted.len(), "Work item complete");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
