//! Title and description extraction from markdown sources.
//!
//! Extraction is best-effort: a file that cannot be read (missing, not
//! UTF-8, permission denied) yields a title derived from its filename and
//! the [`NO_DESCRIPTION`] placeholder. It never fails the build.

use crate::utils::title_from_stem;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokio::fs;
use tracing::{instrument, warn};

/// Description used when no paragraph survives markup stripping.
pub const NO_DESCRIPTION: &str = "No description available.";

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").expect("title regex"));
static HEADING_MARK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#{1,6}\s+").expect("heading regex"));
static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").expect("italic regex"));
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.+?)`").expect("code regex"));
static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.+?)\]\(.+?\)").expect("link regex"));

/// Title and synopsis of one markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub description: String,
}

/// Text of the first `# ` heading, trimmed.
pub fn title_from_content(content: &str) -> Option<String> {
    TITLE_RE
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// First paragraph after the title, stripped of markup and truncated to
/// `max_length` characters at a word boundary.
pub fn description_from_content(content: &str, max_length: usize) -> String {
    let text = TITLE_RE.replace(content, "");
    let text = HEADING_MARK_RE.replace_all(&text, "");
    let text = BOLD_RE.replace_all(&text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");

    text.split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .map(|p| truncate_at_word(p, max_length))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

/// Cut `text` to at most `max_length` characters, back off to the last space
/// inside that window, and append `...`. Short text is returned unchanged.
pub fn truncate_at_word(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let window: String = text.chars().take(max_length).collect();
    let cut = match window.rfind(' ') {
        Some(idx) => &window[..idx],
        None => window.as_str(),
    };
    format!("{cut}...")
}

/// Read `path` and extract its title only.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn extract_title(path: &Path) -> String {
    match fs::read_to_string(path).await {
        Ok(content) => title_from_content(&content).unwrap_or_else(|| title_from_stem(path)),
        Err(e) => {
            warn!(error = %e, "Could not read article; using filename title");
            title_from_stem(path)
        }
    }
}

/// Read `path` and extract both title and description.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn extract(path: &Path, max_length: usize) -> Extracted {
    match fs::read_to_string(path).await {
        Ok(content) => Extracted {
            title: title_from_content(&content).unwrap_or_else(|| title_from_stem(path)),
            description: description_from_content(&content, max_length),
        },
        Err(e) => {
            warn!(error = %e, "Could not read article; using degraded entry");
            Extracted {
                title: title_from_stem(path),
                description: NO_DESCRIPTION.to_string(),
            }
        }
    }
}
