//! Command-line interface definitions for docpages.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every path and the site name can also be provided via environment
//! variables, which lets the binary run unchanged as a MkDocs build hook.

use clap::Parser;

/// Command-line arguments for the docpages generator.
///
/// Path options are optional at this layer so that values from a `--config`
/// file can fill the gaps; [`crate::config::Settings::resolve`] applies the
/// built-in defaults last.
///
/// # Examples
///
/// ```sh
/// # Defaults: docs/articles + data -> generated/
/// docpages
///
/// # Explicit directories
/// docpages -a ./docs/articles -d ./data -o ./site-src
///
/// # Keep going past malformed table files
/// docpages --skip-invalid-tables
/// ```
#[derive(Parser, Debug, Default)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the markdown article sources
    #[arg(short, long, env = "DOCPAGES_ARTICLES_DIR")]
    pub articles_dir: Option<String>,

    /// Directory holding the YAML table definitions
    #[arg(short, long, env = "DOCPAGES_DATA_DIR")]
    pub data_dir: Option<String>,

    /// Root of the generated page tree
    #[arg(short, long, env = "DOCPAGES_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Site name used in the introductory text of the index pages
    #[arg(long, env = "DOCPAGES_SITE_NAME")]
    pub site_name: Option<String>,

    /// Optional path to a YAML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log and skip malformed table files instead of aborting the run
    #[arg(long)]
    pub skip_invalid_tables: bool,
}
