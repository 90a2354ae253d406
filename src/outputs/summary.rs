//! Navigation manifest (`SUMMARY.md`) generation.
//!
//! The manifest is read by the MkDocs literate-nav plugin. Its syntax is a
//! contract with that plugin: four spaces per nesting level, `- [text](path)`
//! for links and a bare `- tables/*.md` glob that the plugin expands itself.
//!
//! ```text
//! - [Home](index.md)
//! - [Articles](articles/index.md)
//!     - [Trade](articles/trade.md)
//! - [Tables](tables/index.md)
//!     - tables/*.md
//! ```
//!
//! The article entries come from a fresh scan of the articles directory, in
//! file name order, not from the articles generator.

use super::{ARTICLES_SUBDIR, INDEX_PAGE, SUMMARY_FILE, TABLES_SUBDIR};
use crate::config::Settings;
use crate::extract::extract_title;
use crate::models::{NavEntry, NavItem, NavigationManifest};
use crate::sources::articles::index_articles;
use crate::utils::{render_lines, write_file};
use std::error::Error;
use tracing::{info, instrument};

/// Generate `SUMMARY.md` at the output root.
#[instrument(level = "info", skip_all, fields(output_dir = %settings.output_dir.display()))]
pub async fn generate_summary(settings: &Settings) -> Result<(), Box<dyn Error>> {
    let mut article_links = Vec::new();
    if let Some(paths) = index_articles(&settings.articles_dir).await? {
        for path in paths {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            article_links.push(NavEntry {
                title: extract_title(&path).await,
                path: format!("{ARTICLES_SUBDIR}/{file_name}"),
            });
        }
    }

    let manifest = build_manifest(&article_links);
    let summary_path = settings.output_dir.join(SUMMARY_FILE);
    write_file(&summary_path, render_lines(&manifest.lines())).await?;
    info!(path = %summary_path.display(), articles = article_links.len(), "Wrote SUMMARY.md");
    Ok(())
}

/// Assemble the fixed manifest around the given article links.
pub fn build_manifest(articles: &[NavEntry]) -> NavigationManifest {
    let article_items = articles
        .iter()
        .map(|a| NavItem::link(a.title.clone(), a.path.clone()))
        .collect();

    NavigationManifest {
        items: vec![
            NavItem::link("Home", INDEX_PAGE),
            NavItem::link("Articles", format!("{ARTICLES_SUBDIR}/{INDEX_PAGE}"))
                .with_children(article_items),
            NavItem::link("Tables", format!("{TABLES_SUBDIR}/{INDEX_PAGE}"))
                .with_children(vec![NavItem::Wildcard(format!("{TABLES_SUBDIR}/*.md"))]),
        ],
    }
}
