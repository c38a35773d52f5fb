//! chatsort - query, filter and re-tag an archive of summarized chat documents.
//!
//! # Overview
//!
//! Each archived conversation is a markdown file with a YAML header carrying
//! its title, date, summary and tags. chatsort provides:
//! - Plain substring and quoted-term (`"food" -"hungry"`) queries per field
//! - A filter engine over metadata, a date range and lazily loaded bodies
//! - Canonical, namespaced tags and change-detecting tag write-back
//! - Persisted filter state so a new session can re-run the last search
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatsort::{Archive, Config, EngineSession, FieldInputs, Scope, SearchOutcome, TagRules};
//! use chatsort::state::{FilterStateStore, MemorySettings};
//!
//! # async fn demo() -> chatsort::Result<()> {
//! let config = Config::default();
//! let archive = Archive::new("/path/to/archive", &config.archive)?;
//! let session = EngineSession::open(
//!     Arc::new(archive),
//!     &Scope::all(),
//!     FilterStateStore::new(Box::new(MemorySettings::new())),
//!     TagRules::from(&config.tags),
//! )?;
//!
//! let inputs = FieldInputs {
//!     content: r#""food" -"hungry""#.to_string(),
//!     ..Default::default()
//! };
//! if let SearchOutcome::Results(docs) = session.search(&inputs).await {
//!     for doc in docs {
//!         println!("{}", doc.title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod atomic;
pub mod cache;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod parser;
pub mod preview;
pub mod search;
pub mod session;
pub mod state;
pub mod store;
pub mod tags;

// Re-export main types at crate root
pub use archive::Archive;
pub use config::Config;
pub use document::Document;
pub use error::{ArchiveError, Result};
pub use search::FieldInputs;
pub use session::{CommitOutcome, EngineSession, SearchOutcome};
pub use store::{DocumentStore, Scope};
pub use tags::TagRules;
