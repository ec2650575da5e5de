//! Output writers: spreadsheet persistence and image downloads.
//!
//! # Submodules
//!
//! - [`spreadsheet`]: Writes a run's extracted records to a timestamped CSV
//! - [`images`]: Downloads result thumbnails over HTTP
//!
//! Both implement the pipeline's collaborator traits and both are fail-soft:
//! they log their own failures and report them through their return values,
//! never by raising past the pipeline.
//!
//! # Output Structure
//!
//! ```text
//! output/
//! ├── news_data_2024-06-15_12-30-05.csv
//! ├── eskom.jpg.png
//! └── tariffs.jpg.png
//! ```

pub mod images;
pub mod spreadsheet;
