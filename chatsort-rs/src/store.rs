//! The boundary between the engine and wherever documents are persisted.

use crate::document::Document;
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Restricts which documents `list_all` returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Only documents under this folder (relative to the store root).
    pub folder: Option<PathBuf>,
    /// Only documents matching this glob (relative to the store root).
    pub glob: Option<String>,
}

impl Scope {
    /// Every document in the store.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: Some(folder.into()),
            glob: None,
        }
    }

    pub fn glob(pattern: impl Into<String>) -> Self {
        Self {
            folder: None,
            glob: Some(pattern.into()),
        }
    }
}

/// A store of documents with cheap metadata and lazily loaded bodies.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents with metadata only. Bodies must not be read here.
    fn list_all(&self, scope: &Scope) -> Result<Vec<Document>>;

    /// Load a document's body with any leading header block removed.
    async fn load_content(&self, path: &Path) -> Result<String>;

    /// Replace a document's whole persisted tag set.
    ///
    /// Either every tag is written or none is; callers never observe a
    /// partially updated tag list.
    async fn write_tags(&self, path: &Path, tags: &[String]) -> Result<()>;
}
