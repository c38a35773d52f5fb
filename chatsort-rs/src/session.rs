//! An interactive engine session.
//!
//! `EngineSession` owns everything a session mutates: the in-memory
//! document list, the content cache, the persisted filter state and the
//! search generation counter. Nothing here is global.

use crate::cache::ContentCache;
use crate::document::Document;
use crate::error::{ArchiveError, Result};
use crate::search::{filter, FieldInputs};
use crate::state::{FilterState, FilterStateStore};
use crate::store::{DocumentStore, Scope};
use crate::tags::{EditorEvent, TagEditor, TagRules, Transition};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info, warn};

/// Result of a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(Vec<Document>),
    /// A newer search started before this one finished; its results win.
    Superseded,
}

/// State restored at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resumed {
    pub state: FilterState,
    /// Whether the saved search was re-run.
    pub ran: bool,
    pub results: Vec<Document>,
}

/// Result of a tag commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub tags: Vec<String>,
}

pub struct EngineSession {
    store: Arc<dyn DocumentStore>,
    documents: RwLock<Arc<Vec<Document>>>,
    cache: ContentCache,
    filter_state: FilterStateStore,
    generation: AtomicU64,
    restored: AtomicBool,
    rules: TagRules,
    /// One write lock per document path, shared by every editor.
    write_locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl EngineSession {
    /// List documents in `scope` and start a session over them.
    pub fn open(
        store: Arc<dyn DocumentStore>,
        scope: &Scope,
        filter_state: FilterStateStore,
        rules: TagRules,
    ) -> Result<Self> {
        let documents = store.list_all(scope)?;
        info!(count = documents.len(), "session opened");

        Ok(Self {
            store,
            documents: RwLock::new(Arc::new(documents)),
            cache: ContentCache::new(),
            filter_state,
            generation: AtomicU64::new(0),
            restored: AtomicBool::new(false),
            rules,
            write_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Snapshot of the current document list.
    pub fn documents(&self) -> Arc<Vec<Document>> {
        Arc::clone(&self.documents.read())
    }

    pub fn document(&self, path: &Path) -> Option<Document> {
        self.documents.read().iter().find(|d| d.path == path).cloned()
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn rules(&self) -> &TagRules {
        &self.rules
    }

    /// The persisted filter state, as it is now.
    pub fn filter_state(&self) -> FilterState {
        self.filter_state.load()
    }

    /// Run an explicit search and record it as applied.
    pub async fn search(&self, inputs: &FieldInputs) -> SearchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.filter_state.save(inputs, true);

        let documents = self.documents();
        let results = filter(&documents, inputs, &self.cache, self.store.as_ref()).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale search results");
            return SearchOutcome::Superseded;
        }
        SearchOutcome::Results(results)
    }

    /// Record field values typed so far without searching.
    pub fn draft(&self, inputs: &FieldInputs) -> FilterState {
        self.filter_state.record_keystroke(inputs)
    }

    /// Restore the saved filter state, re-running the search if one had been
    /// applied. Only the first call in a session reads the saved state.
    pub async fn restore(&self) -> Resumed {
        if self.restored.swap(true, Ordering::SeqCst) {
            debug!("filter state already restored this session");
            return Resumed {
                state: FilterState::default(),
                ran: false,
                results: Vec::new(),
            };
        }

        let state = self.filter_state.load();
        if !state.applied {
            return Resumed {
                state,
                ran: false,
                results: Vec::new(),
            };
        }

        match self.search(&state.fields).await {
            SearchOutcome::Results(results) => Resumed {
                state,
                ran: true,
                results,
            },
            SearchOutcome::Superseded => Resumed {
                state,
                ran: false,
                results: Vec::new(),
            },
        }
    }

    /// A closed tag editor for a document in this session.
    pub fn editor(&self, path: &Path) -> Result<TagEditor> {
        let doc = self
            .document(path)
            .ok_or_else(|| ArchiveError::DocumentNotFound(path.to_path_buf()))?;
        Ok(TagEditor::new(&doc.path, &doc.tags, self.rules.clone()))
    }

    /// Feed an event to an editor, writing tags back if the edit changed them.
    ///
    /// At most one write happens per call, and writes to the same document
    /// from different editors run one at a time. The filter state is saved as
    /// applied first, so reopening the archive shows the same results. On a
    /// failed write the editor is left open with its buffer reverted and the
    /// retryable error is returned.
    pub async fn commit(&self, editor: &mut TagEditor, event: EditorEvent) -> Result<CommitOutcome> {
        let unchanged = |editor: &TagEditor| CommitOutcome {
            path: editor.path().to_path_buf(),
            changed: false,
            tags: editor.tags().to_vec(),
        };

        let tags = match editor.handle(event)? {
            Transition::Write(tags) => tags,
            Transition::Closed | Transition::Busy => return Ok(unchanged(&*editor)),
        };

        let current = self.filter_state.load();
        self.filter_state.save(&current.fields, true);

        let lock = self.write_lock(editor.path());
        let written = {
            let _guard = lock.lock().await;
            self.store.write_tags(editor.path(), &tags).await
        };
        if let Err(e) = &written {
            warn!(path = %editor.path().display(), "tag write-back failed: {}", e);
        }
        let saved = editor.finish(written)?;
        self.update_tags(editor.path(), &saved);

        Ok(CommitOutcome {
            path: editor.path().to_path_buf(),
            changed: true,
            tags: saved,
        })
    }

    /// Open an editor, replace its buffer and confirm.
    pub async fn commit_tags(&self, path: &Path, raw_buffer: &str) -> Result<CommitOutcome> {
        let mut editor = self.editor(path)?;
        editor.open();
        editor.set_buffer(raw_buffer)?;
        self.commit(&mut editor, EditorEvent::Confirm).await
    }

    fn write_lock(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.write_locks.lock();
        Arc::clone(locks.entry(path.to_path_buf()).or_default())
    }

    fn update_tags(&self, path: &Path, tags: &[String]) {
        let mut documents = self.documents.write();
        if let Some(doc) = Arc::make_mut(&mut documents)
            .iter_mut()
            .find(|d| d.path == path)
        {
            doc.tags = tags.to_vec();
        }
    }
}
