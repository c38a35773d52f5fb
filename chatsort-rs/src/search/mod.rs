//! Query parsing and filtering over archived documents.

pub mod engine;
pub mod matcher;
pub mod query;
pub mod types;

pub use engine::{filter, sort_results, CompiledFilter};
pub use matcher::{matches_tags, matches_text};
pub use query::{parse_signed, FieldQuery, SignedTerms};
pub use types::{DateRange, FieldInputs};
