//! Table page generation.
//!
//! Renders each table definition as `tables/<stem>.md` and lists them, in
//! file name order, in `tables/index.md`. Unlike the articles index the
//! tables index is not re-sorted by title.

use super::{INDEX_PAGE, TABLES_SUBDIR};
use crate::config::Settings;
use crate::models::{NavEntry, TableDocument};
use crate::sources::tables::{LoadedTable, index_tables, load_tables};
use crate::utils::{render_lines, write_file};
use itertools::Itertools;
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Line shown on a table page whose definition has no elements.
pub const NO_ELEMENTS: &str = "_No elements defined._";

/// Generate the tables section of the output tree.
///
/// # Returns
///
/// One [`NavEntry`] per table page, in file name order.
///
/// # Errors
///
/// Fails on any write error, and on an unreadable or malformed definition
/// unless [`crate::config::TablePolicy::Lenient`] is configured.
#[instrument(level = "info", skip_all, fields(data_dir = %settings.data_dir.display()))]
pub async fn generate_tables(settings: &Settings) -> Result<Vec<NavEntry>, Box<dyn Error>> {
    let out_dir = settings.output_dir.join(TABLES_SUBDIR);
    let paths = index_tables(&settings.data_dir).await?;
    let tables = load_tables(&paths, settings.table_policy).await?;

    let mut nav = Vec::with_capacity(tables.len());
    for table in &tables {
        let page_name = page_name(table);
        if page_name == INDEX_PAGE {
            warn!(source = %table.source_file.display(), "Table page collides with the tables index and will be overwritten");
        }
        write_file(&out_dir.join(&page_name), render_table_page(&table.document)).await?;
        debug!(page = %page_name, rows = table.document.rows.len(), "Wrote table page");
        nav.push(NavEntry {
            title: table.document.title.clone(),
            path: format!("{TABLES_SUBDIR}/{page_name}"),
        });
    }

    let index_path = out_dir.join(INDEX_PAGE);
    write_file(&index_path, render_index(&settings.site_name, &tables)).await?;
    info!(path = %index_path.display(), count = tables.len(), "Wrote tables index");

    Ok(nav)
}

fn page_name(table: &LoadedTable) -> String {
    format!("{}.md", table.stem)
}

/// Render one table page.
///
/// ```text
/// # Buildings
///
/// | building | cost |
/// |---|---|
/// | Bakery | 800 |
/// ```
pub fn render_table_page(document: &TableDocument) -> String {
    let mut lines = vec![format!("# {}", document.title), String::new()];

    if document.is_empty() {
        lines.push(NO_ELEMENTS.to_string());
    } else {
        lines.push(format!("| {} |", document.headers.iter().join(" | ")));
        lines.push(format!("|{}|", document.headers.iter().map(|_| "---").join("|")));
        for row in &document.rows {
            lines.push(format!("| {} |", row.iter().join(" | ")));
        }
    }
    render_lines(&lines)
}

/// Render `tables/index.md`, keeping the given order.
pub fn render_index(site_name: &str, tables: &[LoadedTable]) -> String {
    let mut lines = vec![
        "# Tables Overview".to_string(),
        String::new(),
        format!("This section contains all available data tables for {site_name}."),
        String::new(),
        "## Available Tables".to_string(),
        String::new(),
    ];
    lines.extend(
        tables
            .iter()
            .map(|t| format!("- [{}]({})", t.document.title, page_name(t))),
    );
    render_lines(&lines)
}
