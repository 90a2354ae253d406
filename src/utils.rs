//! Utility functions for naming, page assembly and file system operations.
//!
//! This module provides helper functions used throughout the application:
//! - Title-casing of filename stems for fallback titles
//! - Joining page lines into final file content
//! - Directory validation and whole-file writes into the output tree

use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Title-case a string word by word.
///
/// A letter is upper-cased when the character before it is not a letter and
/// lower-cased otherwise, so digits and punctuation start a new word.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_case("my file name"), "My File Name");
/// assert_eq!(title_case("GUILD ranks"), "Guild Ranks");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Derive a display title from a file path's stem.
///
/// Underscores and hyphens become spaces, then the result is title-cased.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_from_stem(Path::new("docs/my_file-name.md")), "My File Name");
/// ```
pub fn title_from_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace(['_', '-'], " "))
}

/// Join page lines into file content with a single trailing newline.
pub fn render_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut content = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    content.push('\n');
    content
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Write `content` to `path`, replacing whatever was there.
///
/// Parent directories are created as needed.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let bytes = content.as_ref();
    fs::write(path, bytes).await?;
    debug!(bytes = bytes.len(), "Wrote file");
    Ok(())
}

/// Whether a file name would be matched by a `*.<ext>` glob: the extension
/// matches exactly and the name is not hidden.
pub fn matches_extension(path: &Path, ext: &str) -> bool {
    let visible = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.starts_with('.'));
    visible && path.extension().and_then(|e| e.to_str()) == Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my file name"), "My File Name");
        assert_eq!(title_case("GUILD ranks"), "Guild Ranks");
        assert_eq!(title_case("2nd edition"), "2Nd Edition");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem(Path::new("my_file-name.md")), "My File Name");
        assert_eq!(title_from_stem(Path::new("data/guild_ranks.yml")), "Guild Ranks");
    }

    #[test]
    fn test_render_lines() {
        assert_eq!(render_lines(&["# T", "", "body"]), "# T\n\nbody\n");
        assert_eq!(render_lines::<&str>(&[]), "\n");
    }

    #[test]
    fn test_matches_extension() {
        assert!(matches_extension(Path::new("a/trade.md"), "md"));
        assert!(!matches_extension(Path::new("a/trade.markdown"), "md"));
        assert!(!matches_extension(Path::new("a/.draft.md"), "md"));
        assert!(!matches_extension(Path::new("a/goods.yaml"), "yml"));
    }

    #[tokio::test]
    async fn test_write_file_creates_parents_and_overwrites() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested/deeper/page.md");

        write_file(&target, "first version, longer").await.unwrap();
        write_file(&target, "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "second");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        ensure_writable_dir(&out).await.unwrap();
        assert!(out.is_dir());
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }
}
