//! Per-document tag editing.
//!
//! An editor is a small state machine:
//!
//! ```text
//! Closed --open--> Editing --cancel--> Closed
//!                  Editing --confirm | focus-lost--> (unchanged) Closed
//!                                                    (changed)   Committing --ok--> Closed
//!                                                                Committing --err--> Editing (reverted)
//! ```
//!
//! Focus loss commits rather than cancels: an edit is saved if it changed
//! anything and otherwise simply closes.

use crate::error::{ArchiveError, Result};
use crate::tags::canonical::{canonical_list, TagRules};
use std::path::{Path, PathBuf};

/// Split an edited buffer into canonical, deduplicated tags.
///
/// Lines are split further on commas and whitespace, and a leading `#` on
/// each token is dropped.
pub fn parse_buffer(raw: &str, rules: &TagRules) -> Vec<String> {
    let tokens = raw
        .lines()
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .map(|token| token.trim_start_matches('#'))
        .filter(|token| !token.is_empty());
    canonical_list(tokens, rules)
}

/// Render a tag list as an editable buffer, one tag per line.
pub fn render_buffer(tags: &[String]) -> String {
    tags.join("\n")
}

/// Outcome of comparing an edited buffer with the current tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitPlan {
    /// Canonical forms are identical; nothing to write.
    Unchanged,
    /// The new canonical list to persist.
    Write(Vec<String>),
}

/// Decide whether a buffer changes a document's tags.
///
/// Comparison is order-sensitive over canonical lists.
pub fn plan_commit(raw: &str, current: &[String], rules: &TagRules) -> CommitPlan {
    let next = parse_buffer(raw, rules);
    if next == canonical_list(current, rules) {
        CommitPlan::Unchanged
    } else {
        CommitPlan::Write(next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Closed,
    Editing { buffer: String },
    Committing { pending: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Confirm,
    FocusLost,
    Cancel,
}

/// What the owner of an editor must do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The editor closed without writing.
    Closed,
    /// The editor is committing; persist these tags and report back via
    /// [`TagEditor::finish`].
    Write(Vec<String>),
    /// A write is already in flight for this editor.
    Busy,
}

/// Tag editor bound to one document.
#[derive(Debug, Clone)]
pub struct TagEditor {
    path: PathBuf,
    rules: TagRules,
    last_good: Vec<String>,
    state: EditorState,
}

impl TagEditor {
    /// Create a closed editor for a document with the given tags.
    pub fn new(path: impl Into<PathBuf>, current_tags: &[String], rules: TagRules) -> Self {
        let last_good = canonical_list(current_tags, &rules);
        Self {
            path: path.into(),
            rules,
            last_good,
            state: EditorState::Closed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The last tag list known to be persisted.
    pub fn tags(&self) -> &[String] {
        &self.last_good
    }

    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing { buffer } => Some(buffer),
            _ => None,
        }
    }

    /// Open the editor with a fresh buffer. Opening an open editor keeps its buffer.
    pub fn open(&mut self) {
        if self.state == EditorState::Closed {
            self.state = EditorState::Editing {
                buffer: render_buffer(&self.last_good),
            };
        }
    }

    /// Replace the buffer contents.
    pub fn set_buffer(&mut self, text: impl Into<String>) -> Result<()> {
        match &mut self.state {
            EditorState::Editing { buffer } => {
                *buffer = text.into();
                Ok(())
            }
            _ => Err(ArchiveError::EditorClosed(self.path.clone())),
        }
    }

    /// Drive the editor with a user event.
    pub fn handle(&mut self, event: EditorEvent) -> Result<Transition> {
        let buffer = match &self.state {
            EditorState::Editing { buffer } => buffer.clone(),
            EditorState::Committing { .. } => return Ok(Transition::Busy),
            EditorState::Closed => return Err(ArchiveError::EditorClosed(self.path.clone())),
        };

        if event == EditorEvent::Cancel {
            self.state = EditorState::Closed;
            return Ok(Transition::Closed);
        }

        match plan_commit(&buffer, &self.last_good, &self.rules) {
            CommitPlan::Unchanged => {
                self.state = EditorState::Closed;
                Ok(Transition::Closed)
            }
            CommitPlan::Write(tags) => {
                self.state = EditorState::Committing {
                    pending: tags.clone(),
                };
                Ok(Transition::Write(tags))
            }
        }
    }

    /// Report the result of the write requested by [`Transition::Write`].
    ///
    /// On success the editor closes with the new tags as last-known-good. On
    /// failure the buffer is reverted to the last-known-good tags and the
    /// editor stays open so the user can retry.
    pub fn finish(&mut self, outcome: Result<()>) -> Result<Vec<String>> {
        let pending = match std::mem::replace(&mut self.state, EditorState::Closed) {
            EditorState::Committing { pending } => pending,
            other => {
                self.state = other;
                return Err(ArchiveError::EditorClosed(self.path.clone()));
            }
        };

        match outcome {
            Ok(()) => {
                self.last_good = pending;
                Ok(self.last_good.clone())
            }
            Err(e) => {
                self.state = EditorState::Editing {
                    buffer: render_buffer(&self.last_good),
                };
                Err(e)
            }
        }
    }
}
