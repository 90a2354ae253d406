//! Articles index generation.
//!
//! Copies every article source into `articles/` unchanged and writes
//! `articles/index.md`, a bullet list of links sorted case-insensitively by
//! title.

use super::{ARTICLES_SUBDIR, INDEX_PAGE};
use crate::config::Settings;
use crate::models::{Article, NavEntry};
use crate::sources::articles::{index_articles, load_articles};
use crate::utils::{render_lines, write_file};
use std::error::Error;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Line shown when there is nothing to list.
pub const NO_ARTICLES: &str = "_No articles available yet._";

/// Generate the articles section of the output tree.
///
/// # Returns
///
/// One [`NavEntry`] per copied article, in file name order.
///
/// # Errors
///
/// Fails if the source directory cannot be listed or an article cannot be
/// copied. Title and description extraction never fails.
#[instrument(level = "info", skip_all, fields(articles_dir = %settings.articles_dir.display()))]
pub async fn generate_articles(settings: &Settings) -> Result<Vec<NavEntry>, Box<dyn Error>> {
    let out_dir = settings.output_dir.join(ARTICLES_SUBDIR);
    let mut nav = Vec::new();

    let articles = match index_articles(&settings.articles_dir).await? {
        None => None,
        Some(paths) => {
            let mut articles = load_articles(&paths, settings.description_max_length).await;
            for article in &articles {
                let content = fs::read(&article.source_file).await?;
                write_file(&out_dir.join(&article.path), content).await?;
                debug!(article = %article.path, "Copied article");
                nav.push(NavEntry {
                    title: article.title.clone(),
                    path: format!("{ARTICLES_SUBDIR}/{}", article.path),
                });
            }
            sort_by_title(&mut articles);
            Some(articles)
        }
    };

    let index_path = out_dir.join(INDEX_PAGE);
    let page = render_index(&settings.site_name, articles.as_deref().unwrap_or_default());
    write_file(&index_path, page).await?;
    info!(path = %index_path.display(), count = nav.len(), "Wrote articles index");

    Ok(nav)
}

/// Order articles by lower-cased title. The sort is stable, so equal titles
/// keep their file name order.
pub fn sort_by_title(articles: &mut [Article]) {
    articles.sort_by_cached_key(|a| a.title.to_lowercase());
}

/// Render `articles/index.md` for already-sorted articles.
pub fn render_index(site_name: &str, articles: &[Article]) -> String {
    let intro = format!(
        "Welcome to the {site_name} articles section. Here you'll find detailed guides, explanations, and documentation about various aspects of the game."
    );
    let mut lines = vec![
        "# Articles".to_string(),
        String::new(),
        intro,
        String::new(),
        "## Available Articles".to_string(),
        String::new(),
    ];

    if articles.is_empty() {
        lines.push(NO_ARTICLES.to_string());
    } else {
        lines.extend(
            articles
                .iter()
                .map(|a| format!("- [{}]({})", a.title, a.path)),
        );
    }
    render_lines(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &std::path::Path, name: &str, content: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn test_missing_articles_dir() {
        let root = tempdir().unwrap();
        let settings = Settings::for_root(root.path());

        let nav = generate_articles(&settings).await.unwrap();
        assert!(nav.is_empty());

        let out = root.path().join("out/articles");
        let index = std::fs::read_to_string(out.join("index.md")).unwrap();
        assert!(index.contains("## Available Articles"));
        assert!(index.trim_end().ends_with(NO_ARTICLES));
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_articles_sorted_case_insensitively() {
        let root = tempdir().unwrap();
        let settings = Settings::for_root(root.path());
        write(&settings.articles_dir, "a.md", "# Zebra\n\nStripes.\n");
        write(&settings.articles_dir, "b.md", "# apple\n\nFruit.\n");
        write(&settings.articles_dir, "c.md", "# Mango\n\nAlso fruit.\n");

        let nav = generate_articles(&settings).await.unwrap();
        assert_eq!(nav.len(), 3);
        assert_eq!(nav[0].path, "articles/a.md");

        let index = std::fs::read_to_string(root.path().join("out/articles/index.md")).unwrap();
        let bullets: Vec<&str> = index.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(
            bullets,
            vec!["- [apple](b.md)", "- [Mango](c.md)", "- [Zebra](a.md)"]
        );
    }

    #[tokio::test]
    async fn test_index_md_is_never_copied_or_listed() {
        let root = tempdir().unwrap();
        let settings = Settings::for_root(root.path());
        write(&settings.articles_dir, "index.md", "# Source Index\n");
        write(&settings.articles_dir, "trade.md", "# Trade\n\nBuy low.\n");

        let nav = generate_articles(&settings).await.unwrap();
        assert_eq!(nav.len(), 1);

        let index = std::fs::read_to_string(root.path().join("out/articles/index.md")).unwrap();
        assert!(!index.contains("Source Index"));
        assert!(index.contains("- [Trade](trade.md)"));
    }

    #[tokio::test]
    async fn test_articles_copied_verbatim() {
        let root = tempdir().unwrap();
        let settings = Settings::for_root(root.path());
        let source = "# Trade\r\n\r\nPrices *vary*.\n";
        write(&settings.articles_dir, "trade.md", source);

        generate_articles(&settings).await.unwrap();
        let copied = std::fs::read_to_string(root.path().join("out/articles/trade.md")).unwrap();
        assert_eq!(copied, source);
    }

    #[test]
    fn test_render_index_exact() {
        let articles = vec![Article {
            title: "Trade".into(),
            description: "Buy low.".into(),
            path: "trade.md".into(),
            source_file: "docs/articles/trade.md".into(),
        }];
        assert_eq!(
            render_index("Europa 1400", &articles),
            "# Articles\n\nWelcome to the Europa 1400 articles section. Here you'll find detailed guides, explanations, and documentation about various aspects of the game.\n\n## Available Articles\n\n- [Trade](trade.md)\n"
        );
    }
}
