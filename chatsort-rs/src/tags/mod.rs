//! Canonical tags and the per-document tag editor.

pub mod canonical;
pub mod editor;

pub use canonical::{canonical_list, canonicalize, TagRules};
pub use editor::{
    parse_buffer, plan_commit, render_buffer, CommitPlan, EditorEvent, EditorState, TagEditor,
    Transition,
};
