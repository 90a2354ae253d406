//! Data models for article sources, table definitions and navigation.
//!
//! This module defines the transient structures of one generation pass:
//! - [`Article`]: a markdown source with its extracted title and synopsis
//! - [`TableDefinition`]: the YAML shape of a data table file
//! - [`TableDocument`]: a definition normalised into headers and aligned rows
//! - [`NavEntry`] / [`NavigationManifest`]: the literate-nav link tree
//!
//! Nothing here is persisted; every value is rebuilt from the sources on
//! each run and serialised straight away.

use itertools::Itertools;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// A markdown article discovered in the articles source directory.
#[derive(Debug, Clone)]
pub struct Article {
    /// First level-1 heading, or a title derived from the filename.
    pub title: String,
    /// First paragraph with markup stripped, at most ~150 characters.
    pub description: String,
    /// File name relative to the articles directory (e.g. `trade.md`).
    pub path: String,
    /// Absolute or caller-relative path of the source file.
    pub source_file: PathBuf,
}

/// A scalar or nested value found in a table row.
///
/// Rows are loosely typed: any YAML value may appear as a cell. The
/// `Display` impl is the one stringification used for table cells.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    List(Vec<CellValue>),
    Map(BTreeMap<String, CellValue>),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "None"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Unsigned(u) => write!(f, "{u}"),
            CellValue::Float(x) => write!(f, "{}", format_float(*x)),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            CellValue::Map(entries) => write!(
                f,
                "{{{}}}",
                entries.iter().map(|(k, v)| format!("{k}: {v}")).join(", ")
            ),
        }
    }
}

/// Shortest round-trip form of a float. Magnitudes from 1e16 up, and below
/// 1e-4, use exponent notation with a signed two-digit exponent (`1e+20`,
/// `1.5e-05`); integral values otherwise keep a `.0` suffix.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let magnitude = x.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        let formatted = format!("{x:e}");
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }
    if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

/// One table row: column name to cell. Column sets differ between rows.
pub type Row = BTreeMap<String, CellValue>;

/// Raw shape of a `data/*.yml` file.
///
/// ```yaml
/// name: Guild Ranks
/// elements:
///   - rank: Apprentice
///     fee: 10
///   - rank: Master
///     fee: 250
///     seat: true
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct TableDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub elements: Option<Vec<Row>>,
}

/// A table ready to be rendered as markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDocument {
    pub title: String,
    /// Union of every key across all rows, ascending.
    pub headers: Vec<String>,
    /// One entry per element, aligned to `headers`; missing keys are `""`.
    pub rows: Vec<Vec<String>>,
}

impl TableDocument {
    /// Normalise a definition. `fallback_title` is used when `name` is absent.
    pub fn from_definition(definition: TableDefinition, fallback_title: String) -> Self {
        let title = definition.name.unwrap_or(fallback_title);
        let elements = definition.elements.unwrap_or_default();

        let headers: Vec<String> = elements
            .iter()
            .flat_map(|row| row.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = elements
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|h| row.get(h).map(ToString::to_string).unwrap_or_default())
                    .collect()
            })
            .collect();

        TableDocument {
            title,
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A generated page as the generators report it back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub title: String,
    /// Path relative to the output root, e.g. `tables/guild_ranks.md`.
    pub path: String,
}

impl fmt::Display for NavEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "    - {}: {}", self.title, self.path)
    }
}

/// A node of the `SUMMARY.md` link tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    /// `- [text](path)` with children nested four spaces deeper.
    Link {
        text: String,
        path: String,
        children: Vec<NavItem>,
    },
    /// A bare glob line such as `tables/*.md`, expanded by literate-nav.
    Wildcard(String),
}

impl NavItem {
    pub fn link(text: impl Into<String>, path: impl Into<String>) -> Self {
        NavItem::Link {
            text: text.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, nested: Vec<NavItem>) -> Self {
        if let NavItem::Link { children, .. } = &mut self {
            *children = nested;
        }
        self
    }

    fn push_lines(&self, depth: usize, out: &mut Vec<String>) {
        let indent = "    ".repeat(depth);
        match self {
            NavItem::Link {
                text,
                path,
                children,
            } => {
                out.push(format!("{indent}- [{text}]({path})"));
                for child in children {
                    child.push_lines(depth + 1, out);
                }
            }
            NavItem::Wildcard(pattern) => out.push(format!("{indent}- {pattern}")),
        }
    }
}

/// Ordered link tree written to `SUMMARY.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationManifest {
    pub items: Vec<NavItem>,
}

impl NavigationManifest {
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for item in &self.items {
            item.push_lines(0, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, CellValue)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Null.to_string(), "None");
        assert_eq!(CellValue::Bool(true).to_string(), "True");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
        assert_eq!(CellValue::Integer(-4).to_string(), "-4");
        assert_eq!(CellValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Float(1.0e20).to_string(), "1e+20");
        assert_eq!(CellValue::Float(-2.5e16).to_string(), "-2.5e+16");
        assert_eq!(CellValue::Float(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(CellValue::Float(123456789.0).to_string(), "123456789.0");
        assert_eq!(CellValue::Text("Florin".into()).to_string(), "Florin");
        assert_eq!(
            CellValue::List(vec![CellValue::Integer(1), CellValue::Text("b".into())]).to_string(),
            "[1, b]"
        );
    }

    #[test]
    fn test_cells_deserialize_from_yaml() {
        let parsed: Row = serde_yaml::from_str("a: 1\nb: 1.5\nc: yes-please\nd: false\ne: ~\n").unwrap();
        assert_eq!(parsed["a"], CellValue::Integer(1));
        assert_eq!(parsed["b"], CellValue::Float(1.5));
        assert_eq!(parsed["c"], CellValue::Text("yes-please".into()));
        assert_eq!(parsed["d"], CellValue::Bool(false));
        assert_eq!(parsed["e"], CellValue::Null);
    }

    #[test]
    fn test_large_unsigned_integer_kept_exact() {
        let parsed: Row = serde_yaml::from_str("a: 18446744073709551615
b: -3
").unwrap();
        assert_eq!(parsed["a"], CellValue::Unsigned(u64::MAX));
        assert_eq!(parsed["a"].to_string(), "18446744073709551615");
        assert_eq!(parsed["b"], CellValue::Integer(-3));
    }

    #[test]
    fn test_bool_and_null_cells_in_rows() {
        let definition: TableDefinition =
            serde_yaml::from_str("elements:\n  - a: true\n    b: ~\n  - a: false\n").unwrap();
        let doc = TableDocument::from_definition(definition, "Flags".into());
        assert_eq!(doc.rows, vec![vec!["True", "None"], vec!["False", ""]]);
    }

    #[test]
    fn test_header_union_is_sorted() {
        let definition = TableDefinition {
            name: Some("Goods".into()),
            elements: Some(vec![
                row(&[("a", CellValue::Integer(1)), ("b", CellValue::Integer(2))]),
                row(&[("b", CellValue::Integer(3)), ("c", CellValue::Integer(4))]),
            ]),
        };
        let doc = TableDocument::from_definition(definition, "Fallback".into());

        assert_eq!(doc.title, "Goods");
        assert_eq!(doc.headers, vec!["a", "b", "c"]);
        assert_eq!(doc.rows[0], vec!["1", "2", ""]);
        assert_eq!(doc.rows[1], vec!["", "3", "4"]);
    }

    #[test]
    fn test_missing_name_uses_fallback() {
        let doc = TableDocument::from_definition(TableDefinition::default(), "Guild Ranks".into());
        assert_eq!(doc.title, "Guild Ranks");
        assert!(doc.is_empty());
        assert!(doc.headers.is_empty());
    }

    #[test]
    fn test_manifest_lines() {
        let manifest = NavigationManifest {
            items: vec![
                NavItem::link("Home", "index.md"),
                NavItem::link("Tables", "tables/index.md")
                    .with_children(vec![NavItem::Wildcard("tables/*.md".into())]),
            ],
        };
        assert_eq!(
            manifest.lines(),
            vec![
                "- [Home](index.md)",
                "- [Tables](tables/index.md)",
                "    - tables/*.md",
            ]
        );
    }

    #[test]
    fn test_nav_entry_display() {
        let entry = NavEntry {
            title: "Trade".into(),
            path: "articles/trade.md".into(),
        };
        assert_eq!(entry.to_string(), "    - Trade: articles/trade.md");
    }
}
