//! Markdown article discovery.
//!
//! Articles are the `*.md` files directly inside the articles directory.
//! A file literally named `index.md` is reserved for the generated index and
//! is never treated as an article.

use crate::extract;
use crate::models::Article;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// File name skipped during discovery.
pub const INDEX_FILE: &str = "index.md";

/// List article source files, sorted by file name.
///
/// # Returns
///
/// `None` if the directory does not exist, otherwise the (possibly empty)
/// list of article paths.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn index_articles(dir: &Path) -> Result<Option<Vec<PathBuf>>, Box<dyn Error>> {
    let Some(files) = super::list_files(dir, "md").await? else {
        info!("Articles directory does not exist");
        return Ok(None);
    };

    let articles: Vec<PathBuf> = files
        .into_iter()
        .filter(|p| p.file_name().and_then(|n| n.to_str()) != Some(INDEX_FILE))
        .collect();
    info!(count = articles.len(), "Indexed article sources");
    Ok(Some(articles))
}

/// Build an [`Article`] for every path. Extraction is best-effort, so this
/// never fails; unreadable files get a filename title and placeholder text.
#[instrument(level = "info", skip_all, fields(count = paths.len()))]
pub async fn load_articles(paths: &[PathBuf], description_max_length: usize) -> Vec<Article> {
    let mut articles = Vec::with_capacity(paths.len());
    for path in paths {
        let extracted = extract::extract(path, description_max_length).await;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(path = %path.display(), title = %extracted.title, description = %extracted.description, "Loaded article");
        articles.push(Article {
            title: extracted.title,
            description: extracted.description,
            path: file_name,
            source_file: path.clone(),
        });
    }
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_index_skips_index_md() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.md"), "# Hand-written index\n").unwrap();
        std::fs::write(dir.path().join("trade.md"), "# Trade\n").unwrap();

        let paths = index_articles(dir.path()).await.unwrap().unwrap();
        assert_eq!(paths, vec![dir.path().join("trade.md")]);
    }

    #[tokio::test]
    async fn test_load_articles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("guilds.md");
        std::fs::write(&path, "# The Guilds\n\nEvery craft has one.\n").unwrap();

        let articles = load_articles(&[path.clone()], 150).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "The Guilds");
        assert_eq!(articles[0].description, "Every craft has one.");
        assert_eq!(articles[0].path, "guilds.md");
        assert_eq!(articles[0].source_file, path);
    }
}
