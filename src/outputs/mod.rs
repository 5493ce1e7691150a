//! Output generation for scrape reports.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`ScrapeReport`](crate::models::ScrapeReport) to a JSON file
//!
//! # Output Structure
//!
//! ```text
//! output/
//! └── reviews.json   # default --output path
//! ```

pub mod json;
