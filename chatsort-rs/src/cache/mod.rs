//! Per-session cache of document bodies.
//!
//! Bodies are loaded lazily through a [`DocumentStore`] and kept for the
//! rest of the session. Entries are only ever added:
//! - at most one load is in flight per path; later callers await it
//! - a failed load is not cached, so the next request tries again
//! - callers see a failed load as empty content

use crate::store::DocumentStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

type Slot = Arc<OnceCell<Arc<str>>>;

/// Path-keyed, single-flight body cache.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: Mutex<HashMap<PathBuf, Slot>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a document body, loading it through `store` on first use.
    ///
    /// Never fails: a load error is logged and yields empty content.
    pub async fn get_or_load(&self, store: &dyn DocumentStore, path: &Path) -> Arc<str> {
        let slot = self.slot(path);

        if let Some(content) = slot.get() {
            debug!(path = %path.display(), "content cache hit");
            return Arc::clone(content);
        }

        let loaded = slot
            .get_or_try_init(|| async {
                debug!(path = %path.display(), "loading content");
                store.load_content(path).await.map(Arc::<str>::from)
            })
            .await;

        match loaded {
            Ok(content) => Arc::clone(content),
            Err(e) => {
                warn!(path = %path.display(), "content load failed, treating as empty: {}", e);
                Arc::from("")
            }
        }
    }

    /// The slot for a path, created on first request. The lock is released
    /// before any load is awaited.
    fn slot(&self, path: &Path) -> Slot {
        let mut entries = self.entries.lock();
        Arc::clone(entries.entry(path.to_path_buf()).or_default())
    }

    /// Whether a body for `path` has been loaded.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries
            .lock()
            .get(path)
            .is_some_and(|slot| slot.initialized())
    }

    /// Number of loaded bodies.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
