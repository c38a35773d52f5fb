//! Document metadata.

use crate::parser::filename::parse_filename;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::PathBuf;

/// Metadata keys consulted for the creation date, in order.
const DATE_KEYS: &[&str] = &["date", "created"];

/// One archived conversation, without its body.
///
/// Body text is loaded separately through the content cache; the path is
/// the only key used for that lookup and for tag write-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to the archive root.
    pub path: PathBuf,

    /// Title from metadata, or derived from the filename.
    pub title: String,

    /// Resolved creation date; `None` excludes the document from date filters.
    pub created: Option<NaiveDate>,

    pub summary: String,

    /// Tags in authoring order. May contain non-canonical duplicates.
    pub tags: Vec<String>,
}

impl Document {
    /// Build a document from its path and parsed header block.
    pub fn from_metadata(path: impl Into<PathBuf>, frontmatter: Option<&Mapping>) -> Self {
        let path = path.into();
        let from_name = parse_filename(&path);

        let title = frontmatter
            .and_then(|fm| string_field(fm, "title"))
            .filter(|t| !t.is_empty())
            .unwrap_or(from_name.title);

        let created = frontmatter
            .and_then(|fm| {
                DATE_KEYS
                    .iter()
                    .find_map(|key| fm.get(*key).and_then(parse_date_value))
            })
            .or(from_name.date);

        let summary = frontmatter
            .and_then(|fm| string_field(fm, "summary"))
            .unwrap_or_default();

        let tags = frontmatter
            .and_then(|fm| fm.get("tags"))
            .map(tags_from_value)
            .unwrap_or_default();

        Self {
            path,
            title,
            created,
            summary,
            tags,
        }
    }
}

fn string_field(fm: &Mapping, key: &str) -> Option<String> {
    fm.get(key).and_then(scalar_to_string).map(|s| s.trim().to_string())
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse a metadata date: `YYYY-MM-DD`, RFC 3339, or anything starting with a
/// `YYYY-MM-DD` prefix.
fn parse_date_value(value: &YamlValue) -> Option<NaiveDate> {
    let raw = scalar_to_string(value)?;
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Tags may be a YAML sequence or a single comma/space separated scalar.
fn tags_from_value(value: &YamlValue) -> Vec<String> {
    match value {
        YamlValue::Sequence(items) => items
            .iter()
            .filter_map(scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => scalar_to_string(other)
            .map(|s| {
                s.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
