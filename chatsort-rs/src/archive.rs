//! Filesystem archive of markdown conversation documents.

use crate::atomic::write_atomic_async;
use crate::config::ArchiveConfig;
use crate::document::Document;
use crate::error::{ArchiveError, Result};
use crate::parser::{parse_frontmatter, read_frontmatter, replace_frontmatter, strip_frontmatter};
use crate::store::{DocumentStore, Scope};
use async_trait::async_trait;
use glob::glob;
use serde_yaml::{Mapping, Value as YamlValue};
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// A directory tree of `.md` documents.
#[derive(Debug, Clone)]
pub struct Archive {
    /// Root path of the archive.
    pub root: PathBuf,
    skip: Vec<String>,
    skip_dirs: Vec<String>,
}

impl Archive {
    /// Open an archive rooted at an existing directory.
    pub fn new(root: impl Into<PathBuf>, config: &ArchiveConfig) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(ArchiveError::ArchiveNotFound(root));
        }

        Ok(Self {
            root,
            skip: config.skip.clone(),
            skip_dirs: config.skip_dirs.clone(),
        })
    }

    /// Get the full path to a document.
    pub fn document_path(&self, relative_path: &Path) -> PathBuf {
        self.root.join(relative_path)
    }

    /// List document paths (relative to the root) within a scope, sorted.
    pub fn list_paths(&self, scope: &Scope) -> Result<Vec<PathBuf>> {
        let pattern = match (&scope.glob, &scope.folder) {
            (Some(glob), _) => self.root.join(glob),
            (None, Some(folder)) => self.root.join(folder).join("**/*.md"),
            (None, None) => self.root.join("**/*.md"),
        };
        let pattern_str = pattern.to_string_lossy();

        let mut paths = Vec::new();
        for entry in glob(&pattern_str)? {
            match entry {
                Ok(path) => {
                    if !path.is_file() || path.extension().is_none_or(|e| e != "md") {
                        continue;
                    }
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        if self.is_listed(relative) {
                            paths.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => warn!("glob error: {}", e),
            }
        }

        paths.sort();
        Ok(paths)
    }

    /// Hidden entries, skipped directories and skipped basenames are never documents.
    fn is_listed(&self, relative: &Path) -> bool {
        let hidden_or_skipped = relative.components().any(|c| match c {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                name.starts_with('.') || self.skip_dirs.iter().any(|d| *d == name)
            }
            _ => false,
        });
        if hidden_or_skipped {
            return false;
        }

        let basename = relative
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        !self.skip.iter().any(|s| *s == basename)
    }

    /// Read a document's metadata without reading its body.
    ///
    /// A malformed header is logged and treated as absent, so the document
    /// still appears with filename-derived metadata.
    pub fn read_document(&self, relative_path: &Path) -> Result<Document> {
        let file = File::open(self.document_path(relative_path)).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ArchiveError::DocumentNotFound(relative_path.to_path_buf())
            } else {
                ArchiveError::Io(e)
            }
        })?;

        let frontmatter = match read_frontmatter(BufReader::new(file), relative_path) {
            Ok(fm) => fm,
            Err(ArchiveError::InvalidFrontmatter { path, message }) => {
                warn!(path = %path.display(), "ignoring invalid frontmatter: {}", message);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Document::from_metadata(relative_path, frontmatter.as_ref()))
    }
}

#[async_trait]
impl DocumentStore for Archive {
    fn list_all(&self, scope: &Scope) -> Result<Vec<Document>> {
        let paths = self.list_paths(scope)?;
        let mut documents = Vec::with_capacity(paths.len());

        for path in paths {
            match self.read_document(&path) {
                Ok(doc) => documents.push(doc),
                Err(e) => warn!(path = %path.display(), "skipping unreadable document: {}", e),
            }
        }

        debug!(count = documents.len(), "listed documents");
        Ok(documents)
    }

    async fn load_content(&self, path: &Path) -> Result<String> {
        let raw = tokio::fs::read_to_string(self.document_path(path))
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ArchiveError::DocumentNotFound(path.to_path_buf())
                } else {
                    ArchiveError::ContentLoad {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }
                }
            })?;
        Ok(strip_frontmatter(&raw).to_string())
    }

    async fn write_tags(&self, path: &Path, tags: &[String]) -> Result<()> {
        let full_path = self.document_path(path);
        let write_err = |message: String| ArchiveError::WriteBack {
            path: path.to_path_buf(),
            message,
        };

        let raw = tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| write_err(e.to_string()))?;

        let mut map = parse_frontmatter(&raw, path)
            .map_err(|e| write_err(e.to_string()))?
            .unwrap_or_else(Mapping::new);
        map.insert(
            YamlValue::String("tags".to_string()),
            YamlValue::Sequence(tags.iter().cloned().map(YamlValue::String).collect()),
        );

        let updated = replace_frontmatter(&raw, &map).map_err(|e| write_err(e.to_string()))?;
        write_atomic_async(&full_path, updated.as_bytes())
            .await
            .map_err(|e| write_err(e.to_string()))?;

        info!(path = %path.display(), count = tags.len(), "wrote tags");
        Ok(())
    }
}
