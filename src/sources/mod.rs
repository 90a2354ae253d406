//! Source discovery and loading.
//!
//! Each source module follows the same two-phase pattern:
//!
//! 1. **Indexing**: list the candidate files of one input directory, sorted
//!    by filename so every run sees them in the same order
//! 2. **Loading**: turn each file into a model value
//!
//! | Source | Module | Input | Failure policy |
//! |--------|--------|-------|----------------|
//! | Articles | [`articles`] | `*.md` except `index.md` | best-effort, never fails |
//! | Tables | [`tables`] | `*.yml` | [`crate::config::TablePolicy`] |
//!
//! A missing input directory is not an error for either source; it indexes
//! as empty.

pub mod articles;
pub mod tables;

use crate::utils::matches_extension;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// List regular files directly inside `dir` with extension `ext`, sorted by
/// file name. Returns `None` when `dir` does not exist.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display(), ext = %ext))]
pub(crate) async fn list_files(dir: &Path, ext: &str) -> Result<Option<Vec<PathBuf>>, Box<dyn Error>> {
    if !fs::try_exists(dir).await? {
        return Ok(None);
    }

    let mut entries = fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !matches_extension(&path, ext) {
            continue;
        }
        // metadata() follows symlinks, like a shell glob would
        if fs::metadata(&path).await.map(|m| m.is_file()).unwrap_or(false) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(count = files.len(), "Listed source files");
    Ok(Some(files))
}
