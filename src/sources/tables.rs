//! YAML table definition discovery and parsing.
//!
//! Each `*.yml` file in the data directory describes one table:
//!
//! ```yaml
//! name: Buildings      # optional, defaults to the title-cased file stem
//! elements:            # optional, defaults to no rows
//!   - building: Bakery
//!     cost: 800
//!   - building: Tavern
//!     cost: 1200
//!     license: true
//! ```

use crate::config::TablePolicy;
use crate::models::{TableDefinition, TableDocument};
use crate::utils::title_from_stem;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, instrument, warn};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read table file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in table file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Table file {path} holds an empty YAML document")]
    Empty { path: PathBuf },
}

/// A parsed table together with the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub source_file: PathBuf,
    /// File stem; the generated page is `<stem>.md`.
    pub stem: String,
    pub document: TableDocument,
}

/// List table definition files, sorted by file name. A missing directory
/// indexes as empty.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn index_tables(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    match super::list_files(dir, "yml").await? {
        Some(files) => {
            info!(count = files.len(), "Indexed table definitions");
            Ok(files)
        }
        None => {
            warn!("Data directory does not exist; no tables will be generated");
            Ok(Vec::new())
        }
    }
}

/// Parse one table definition file.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn load_table(path: &Path) -> Result<LoadedTable, TableError> {
    let raw = fs::read_to_string(path).await.map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |source| TableError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let value: serde_yaml::Value = serde_yaml::from_str(&raw).map_err(parse_error)?;
    if value.is_null() {
        return Err(TableError::Empty {
            path: path.to_path_buf(),
        });
    }
    let definition: TableDefinition = serde_yaml::from_value(value).map_err(parse_error)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(LoadedTable {
        source_file: path.to_path_buf(),
        stem,
        document: TableDocument::from_definition(definition, title_from_stem(path)),
    })
}

/// Parse every path in order, applying `policy` to failures.
///
/// Under [`TablePolicy::Strict`] the first failure is returned. Under
/// [`TablePolicy::Lenient`] failing files are logged and dropped.
#[instrument(level = "info", skip_all, fields(count = paths.len(), policy = ?policy))]
pub async fn load_tables(paths: &[PathBuf], policy: TablePolicy) -> Result<Vec<LoadedTable>, TableError> {
    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        match load_table(path).await {
            Ok(table) => tables.push(table),
            Err(e) if policy == TablePolicy::Lenient => {
                warn!(error = %e, "Skipping invalid table definition");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(tables)
}
