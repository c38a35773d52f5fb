//! The filter engine.
//!
//! Filtering runs in one pass, cheapest checks first:
//! 1. nothing entered: no results
//! 2. title, tag and summary predicates
//! 3. date range
//! 4. content predicate, loading bodies only for survivors
//! 5. sort: newest first, undated last, then title
//!
//! Documents are never mutated.

use super::matcher::{matches_tags, matches_text};
use super::query::FieldQuery;
use super::types::{DateRange, FieldInputs};
use crate::cache::ContentCache;
use crate::document::Document;
use crate::store::DocumentStore;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// Parsed form of a set of field inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledFilter {
    pub title: FieldQuery,
    pub tag: FieldQuery,
    pub summary: FieldQuery,
    pub content: FieldQuery,
    #[serde(skip)]
    pub dates: DateRange,
}

impl CompiledFilter {
    pub fn compile(inputs: &FieldInputs) -> Self {
        Self {
            title: FieldQuery::parse(&inputs.title),
            tag: FieldQuery::parse(&inputs.tag),
            summary: FieldQuery::parse(&inputs.summary),
            content: FieldQuery::parse(&inputs.content),
            dates: inputs.date_range(),
        }
    }

    /// Everything except content.
    pub fn matches_metadata(&self, doc: &Document) -> bool {
        matches_text(&doc.title, &self.title)
            && matches_tags(&doc.tags, &self.tag)
            && matches_text(&doc.summary, &self.summary)
            && self.dates.contains(doc.created)
    }

    pub fn needs_content(&self) -> bool {
        !self.content.is_unconstrained()
    }
}

/// Filter and sort `documents` against raw field inputs.
///
/// Bodies are fetched through `cache`, so repeated searches in a session
/// read each body at most once.
pub async fn filter(
    documents: &[Document],
    inputs: &FieldInputs,
    cache: &ContentCache,
    store: &dyn DocumentStore,
) -> Vec<Document> {
    if inputs.is_empty() {
        debug!("no filter input, returning nothing");
        return Vec::new();
    }

    let compiled = CompiledFilter::compile(inputs);
    let mut results: Vec<Document> = documents
        .iter()
        .filter(|doc| compiled.matches_metadata(doc))
        .cloned()
        .collect();

    if compiled.needs_content() {
        let candidates = std::mem::take(&mut results);
        debug!(candidates = candidates.len(), "filtering on content");
        for doc in candidates {
            let body = cache.get_or_load(store, &doc.path).await;
            if matches_text(&body, &compiled.content) {
                results.push(doc);
            }
        }
    }

    sort_results(&mut results);
    debug!(count = results.len(), "search finished");
    results
}

/// Sort newest first. Undated documents sort last; ties break on title,
/// then path, so the order is total.
pub fn sort_results(results: &mut [Document]) {
    results.sort_by(compare_documents);
}

fn compare_documents(a: &Document, b: &Document) -> Ordering {
    let by_date = match (a.created, b.created) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.path.cmp(&b.path))
}
