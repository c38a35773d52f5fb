//! Query parsing for a single filter field.
//!
//! A field is either a plain substring or a set of quoted terms:
//!
//! ```text
//! trip                 plain: "trip" anywhere
//! "food" "eat"         both phrases present
//! "food" -"hungry"     "food" present, "hungry" absent
//! ```
//!
//! Once any quoted token appears, unquoted text in the same field is
//! ignored. Parsing never fails; an unterminated quote simply matches
//! nothing.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// An optional `-` immediately followed by a double-quoted phrase.
static SIGNED_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(-?)"([^"]*)""#).unwrap());

/// Required and forbidden phrases, lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignedTerms {
    pub positive: BTreeSet<String>,
    pub negative: BTreeSet<String>,
}

impl SignedTerms {
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }
}

/// Extract signed quoted phrases from raw input.
pub fn parse_signed(raw: &str) -> SignedTerms {
    let mut terms = SignedTerms::default();

    for cap in SIGNED_TERM.captures_iter(raw) {
        let phrase = cap[2].trim().to_lowercase();
        if phrase.is_empty() {
            continue;
        }
        if cap[1].is_empty() {
            terms.positive.insert(phrase);
        } else {
            terms.negative.insert(phrase);
        }
    }

    terms
}

/// A parsed field query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FieldQuery {
    /// Lower-cased, trimmed substring. Empty matches everything.
    Plain { text: String },
    /// Quoted terms; unquoted text was present but ignored.
    Signed { terms: SignedTerms },
}

impl FieldQuery {
    pub fn parse(raw: &str) -> Self {
        if SIGNED_TERM.is_match(raw) {
            FieldQuery::Signed {
                terms: parse_signed(raw),
            }
        } else {
            FieldQuery::Plain {
                text: raw.trim().to_lowercase(),
            }
        }
    }

    /// True when the query passes every document.
    pub fn is_unconstrained(&self) -> bool {
        match self {
            FieldQuery::Plain { text } => text.is_empty(),
            FieldQuery::Signed { terms } => terms.is_empty(),
        }
    }
}
