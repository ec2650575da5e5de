//! Command-line interface definitions for the news search bot.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! A run takes its work either from a JSON work-items file or from a single
//! inline item given via flags.

use clap::Parser;

/// Command-line arguments for the news search bot.
///
/// # Examples
///
/// ```sh
/// # One inline work item
/// news_search_bot -s "load shedding" -n 2 -c news
///
/// # A batch of work items from a JSON file
/// news_search_bot --work-items ./items.json
///
/// # Custom output directory
/// news_search_bot -s eskom -c news -o ./run-output
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Phrase to search for (ignored when --work-items is given)
    #[arg(short, long)]
    pub search_phrase: Option<String>,

    /// How many months back results may be dated (0 is treated as 1)
    #[arg(short, long, default_value_t = 1)]
    pub num_months: u32,

    /// Category results must be tagged with (ignored when --work-items is given)
    #[arg(short = 'c', long)]
    pub news_category: Option<String>,

    /// Path to a JSON file holding an array of work items
    #[arg(short, long)]
    pub work_items: Option<String>,

    /// Directory for the spreadsheet and downloaded images
    #[arg(short, long, default_value = "output")]
    pub output_dir: String,
}
