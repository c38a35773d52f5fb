//! Filter inputs as the user typed them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The six raw filter fields.
///
/// Values are kept exactly as entered; parsing happens when a search runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldInputs {
    pub title: String,
    pub tag: String,
    pub summary: String,
    pub content: String,
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    pub date_from: String,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    pub date_to: String,
}

impl FieldInputs {
    /// True when the user has not asked for anything.
    ///
    /// Whitespace-only values count as empty. A date bound that does not
    /// parse still counts as entered.
    pub fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.tag,
            &self.summary,
            &self.content,
            &self.date_from,
            &self.date_to,
        ]
        .iter()
        .all(|value| value.trim().is_empty())
    }

    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: parse_bound(&self.date_from),
            end: parse_bound(&self.date_to),
        }
    }
}

fn parse_bound(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// An inclusive, possibly half-open date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with no bounds constrains nothing.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether a resolved creation date passes the range.
    ///
    /// Undated documents pass only an unbounded range.
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}
