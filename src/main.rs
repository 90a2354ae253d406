//! # docpages
//!
//! Generates the derived pages of a MkDocs documentation site from two plain
//! sources: a directory of markdown articles and a directory of YAML data
//! tables.
//!
//! ## Features
//!
//! - Copies every article into the output tree and writes an articles index
//!   sorted by title, each entry titled from the article's first `#` heading
//! - Renders every YAML table definition as a markdown table page, with the
//!   columns taken from the union of all row keys, plus a tables index
//! - Writes a `SUMMARY.md` navigation manifest for the literate-nav plugin
//!
//! ## Usage
//!
//! ```sh
//! docpages -a docs/articles -d data -o generated
//! ```
//!
//! ## Architecture
//!
//! Three independent generators run in sequence, each reading one source
//! directory and writing a disjoint part of the output tree:
//! 1. **Articles**: `articles/index.md` and verbatim article copies
//! 2. **Tables**: `tables/index.md` and one page per definition
//! 3. **Summary**: `SUMMARY.md`
//!
//! Re-running with unchanged inputs reproduces byte-identical output.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod extract;
mod models;
mod outputs;
mod sources;
mod utils;

use cli::Cli;
use config::Settings;
use models::NavEntry;
use outputs::{articles, summary, tables};
use utils::ensure_writable_dir;

#[tokio::main]
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
    info!("docpages starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = Settings::resolve(&args).await.inspect_err(|e| {
        error!(error = %e, "Failed to resolve settings");
    })?;

    if let Err(e) = run(&settings).await {
        error!(error = %e, "Generation failed");
        return Err(e);
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

/// Run the whole generation pass against resolved settings.
#[instrument(level = "info", skip_all, fields(output_dir = %settings.output_dir.display()))]
async fn run(settings: &Settings) -> Result<(), Box<dyn Error>> {
    ensure_writable_dir(&settings.output_dir).await?;

    let article_nav = articles::generate_articles(settings).await?;
    log_nav("articles", &article_nav);

    let table_nav = tables::generate_tables(settings).await?;
    log_nav("tables", &table_nav);

    summary::generate_summary(settings).await?;
    Ok(())
}

fn log_nav(section: &str, entries: &[NavEntry]) {
    info!(section, pages = entries.len(), "Generated section");
    for entry in entries {
        debug!(section, "{entry}");
    }
}
