//! Field predicates.

use super::query::{FieldQuery, SignedTerms};

/// Match a single text field, case-insensitively.
pub fn matches_text(text: &str, query: &FieldQuery) -> bool {
    if query.is_unconstrained() {
        return true;
    }
    let haystack = text.to_lowercase();
    match query {
        FieldQuery::Plain { text: needle } => haystack.contains(needle.as_str()),
        FieldQuery::Signed { terms } => {
            contains_all(terms, |term| haystack.contains(term))
                && contains_none(terms, |term| haystack.contains(term))
        }
    }
}

/// Match a tag set. Each term is a substring test against individual tags:
/// a positive term must occur in at least one tag, a negative term in none.
pub fn matches_tags(tags: &[String], query: &FieldQuery) -> bool {
    if query.is_unconstrained() {
        return true;
    }
    let tags: Vec<String> = tags.iter().map(|t| t.to_lowercase()).collect();
    let any_tag = |term: &str| tags.iter().any(|tag| tag.contains(term));

    match query {
        FieldQuery::Plain { text } => any_tag(text),
        FieldQuery::Signed { terms } => contains_all(terms, any_tag) && contains_none(terms, any_tag),
    }
}

fn contains_all(terms: &SignedTerms, found: impl Fn(&str) -> bool) -> bool {
    terms.positive.iter().all(|term| found(term))
}

fn contains_none(terms: &SignedTerms, found: impl Fn(&str) -> bool) -> bool {
    !terms.negative.iter().any(|term| found(term))
}
