//! `search`, `draft` and `resume` commands.

use crate::cli::args::{DisplayArgs, DraftArgs, ResumeArgs, SearchArgs};
use crate::cli::output::Output;
use crate::document::Document;
use crate::error::Result;
use crate::preview::{preview, Preview};
use crate::search::FieldInputs;
use crate::session::{EngineSession, SearchOutcome};
use crate::state::FilterStateStore;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub fields: FieldInputs,
    pub applied: bool,
    pub total: usize,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub summary: Preview,
}

impl SearchResponse {
    fn new(
        fields: FieldInputs,
        applied: bool,
        documents: &[Document],
        display: &DisplayArgs,
        preview_chars: usize,
    ) -> Self {
        let limit = display.limit.unwrap_or(documents.len());
        let results = documents
            .iter()
            .take(limit)
            .map(|doc| SearchResult {
                path: doc.path.to_string_lossy().to_string(),
                title: doc.title.clone(),
                date: doc.created,
                tags: doc.tags.clone(),
                summary: preview(&doc.summary, preview_chars, display.full),
            })
            .collect();

        Self {
            fields,
            applied,
            total: documents.len(),
            results,
        }
    }
}

pub async fn run(
    session: &EngineSession,
    args: &SearchArgs,
    preview_chars: usize,
    output: &Output,
) -> Result<()> {
    let inputs = args.fields.to_inputs();

    let documents = match session.search(&inputs).await {
        SearchOutcome::Results(documents) => documents,
        // Only one search runs per invocation, so this is never stale in practice.
        SearchOutcome::Superseded => Vec::new(),
    };

    if inputs.is_empty() {
        output.info("No filters given; nothing to show.");
    }

    let response = SearchResponse::new(inputs, true, &documents, &args.display, preview_chars);
    output.print(&response)
}

pub fn draft(store: &FilterStateStore, args: &DraftArgs, output: &Output) -> Result<()> {
    let state = store.record_keystroke(&args.fields.to_inputs());
    output.print(&state)
}

pub async fn resume(
    session: &EngineSession,
    args: &ResumeArgs,
    preview_chars: usize,
    output: &Output,
) -> Result<()> {
    let resumed = session.restore().await;

    if !resumed.state.applied {
        output.info("No search has been run yet; showing nothing.");
    }

    let response = SearchResponse::new(
        resumed.state.fields,
        resumed.state.applied,
        &resumed.results,
        &args.display,
        preview_chars,
    );
    output.print(&response)
}
