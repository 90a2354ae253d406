//! Page generators for the articles, tables and navigation outputs.
//!
//! Each generator reads one source directory and writes into its own part
//! of the output tree, so they can run in any order:
//!
//! - [`articles`]: copies article sources and writes the articles index
//! - [`tables`]: renders one page per table definition plus the tables index
//! - [`summary`]: writes the literate-nav `SUMMARY.md`
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── SUMMARY.md             # literate-nav manifest
//! ├── articles/
//! │   ├── index.md           # generated index, sorted by title
//! │   └── trade.md           # verbatim copy of the source
//! └── tables/
//!     ├── index.md           # generated index, in file order
//!     └── buildings.md       # rendered markdown table
//! ```
//!
//! Every file is rewritten in full on each run; nothing is appended or
//! merged with earlier output.

pub mod articles;
pub mod summary;
pub mod tables;

/// Output subdirectory for articles.
pub const ARTICLES_SUBDIR: &str = "articles";
/// Output subdirectory for tables.
pub const TABLES_SUBDIR: &str = "tables";
/// Index page name inside each subdirectory.
pub const INDEX_PAGE: &str = "index.md";
/// Navigation manifest at the output root.
pub const SUMMARY_FILE: &str = "SUMMARY.md";
