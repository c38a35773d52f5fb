//! Title and date extraction from archive filenames.
//!
//! Exported chats are named `YYYY-MM-DD - Title - <id>.md`; long chats that
//! were split carry a trailing ` (part N)`.

use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static DATED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})\s*-\s*(.*?)(?:\s+-\s+[A-Za-z0-9]{1,16})?(\s+\(part \d+\))?$")
        .unwrap()
});

/// What a filename says about its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameInfo {
    pub title: String,
    /// `None` for undated names and for placeholder dates like `0000-00-00`.
    pub date: Option<NaiveDate>,
}

/// Parse the title and creation date encoded in a document's filename.
pub fn parse_filename(path: &Path) -> FilenameInfo {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .trim();

    let Some(caps) = DATED_NAME.captures(stem) else {
        return FilenameInfo {
            title: stem.to_string(),
            date: None,
        };
    };

    let date = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok();
    let mut title = caps[2].trim().to_string();
    if let Some(part) = caps.get(3) {
        title.push_str(part.as_str());
    }
    if title.is_empty() {
        title = stem.to_string();
    }

    FilenameInfo { title, date }
}
