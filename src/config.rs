//! Settings resolution.
//!
//! Values come from three layers, highest precedence first: explicit CLI
//! flags (or their environment variables), an optional YAML settings file,
//! and the built-in defaults below.

use crate::cli::Cli;
use serde::Deserialize;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument};

pub const DEFAULT_ARTICLES_DIR: &str = "docs/articles";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT_DIR: &str = "generated";
pub const DEFAULT_SITE_NAME: &str = "Europa 1400";
pub const DEFAULT_DESCRIPTION_MAX_LENGTH: usize = 150;

/// What to do when a table definition cannot be read or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TablePolicy {
    /// Abort the whole generation pass.
    #[default]
    Strict,
    /// Log the failure and leave the table out of the output.
    Lenient,
}

/// Shape of the optional `--config` YAML file. Every key is optional.
///
/// ```yaml
/// articles_dir: docs/articles
/// data_dir: data
/// output_dir: generated
/// site_name: Europa 1400
/// skip_invalid_tables: false
/// description_max_length: 150
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub articles_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub site_name: Option<String>,
    pub skip_invalid_tables: Option<bool>,
    pub description_max_length: Option<usize>,
}

/// Fully resolved settings handed to every generator.
#[derive(Debug, Clone)]
pub struct Settings {
    pub articles_dir: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub site_name: String,
    pub table_policy: TablePolicy,
    pub description_max_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::merge(&Cli::default(), FileSettings::default())
    }
}

impl Settings {
    /// Load the settings file named by `--config` (if any) and merge it with
    /// the CLI values.
    #[instrument(level = "info", skip_all, fields(config = ?cli.config))]
    pub async fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let file = match &cli.config {
            Some(path) => {
                let raw = fs::read_to_string(path).await?;
                let parsed: FileSettings = serde_yaml::from_str(&raw)?;
                info!(path = %path, "Loaded settings file");
                parsed
            }
            None => FileSettings::default(),
        };

        let settings = Self::merge(cli, file);
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    fn merge(cli: &Cli, file: FileSettings) -> Self {
        let skip_invalid = cli.skip_invalid_tables || file.skip_invalid_tables.unwrap_or(false);

        Self {
            articles_dir: cli
                .articles_dir
                .as_ref()
                .map(PathBuf::from)
                .or(file.articles_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTICLES_DIR)),
            data_dir: cli
                .data_dir
                .as_ref()
                .map(PathBuf::from)
                .or(file.data_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            output_dir: cli
                .output_dir
                .as_ref()
                .map(PathBuf::from)
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            site_name: cli
                .site_name
                .clone()
                .or(file.site_name)
                .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
            table_policy: if skip_invalid {
                TablePolicy::Lenient
            } else {
                TablePolicy::Strict
            },
            description_max_length: file
                .description_max_length
                .unwrap_or(DEFAULT_DESCRIPTION_MAX_LENGTH),
        }
    }

    /// Build settings rooted in a scratch directory: `<root>/articles`,
    /// `<root>/data` and `<root>/out`.
    #[cfg(test)]
    pub fn for_root(root: &std::path::Path) -> Self {
        Self {
            articles_dir: root.join("articles"),
            data_dir: root.join("data"),
            output_dir: root.join("out"),
            ..Self::default()
        }
    }
}
