//! User configuration loaded from `~/.config/chatsort/config.toml`.

use crate::error::{ArchiveError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub tags: TagConfig,
    pub settings: SettingsConfig,
    pub display: DisplayConfig,
}

/// Where the documents live and which files are never listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Default archive root, used when `--archive` is not given.
    pub path: Option<PathBuf>,
    /// Exact basenames that are never treated as documents.
    pub skip: Vec<String>,
    /// Directory names whose contents are never listed.
    pub skip_dirs: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            path: None,
            skip: vec!["dashboard.md".to_string(), "notes.md".to_string()],
            skip_dirs: vec!["_assets".to_string()],
        }
    }
}

/// Tag namespace rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Namespace prefixed onto tags that are not already rooted.
    pub root: String,
    /// Namespaces that are left untouched when a tag already starts with one.
    pub namespaces: Vec<String>,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            root: "misc".to_string(),
            namespaces: vec!["misc".to_string()],
        }
    }
}

/// Location of the persisted filter state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// "local" (inside the archive) or "global" (user data dir).
    pub location: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            location: "local".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Summary characters shown before the preview is truncated.
    pub preview_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { preview_chars: 240 }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chatsort").join("config.toml"))
    }

    /// Load the config from the default location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ArchiveError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Resolve the archive root: CLI flag first, then the config file.
    pub fn resolve_archive_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        self.archive.path.clone().ok_or_else(|| {
            ArchiveError::ConfigError(
                "no archive given; pass --archive or set archive.path in config.toml".to_string(),
            )
        })
    }

    /// Path of the settings file for a given archive.
    pub fn settings_path(&self, archive_root: &Path) -> PathBuf {
        if self.settings.location == "global" {
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};

            let mut hasher = DefaultHasher::new();
            archive_root.hash(&mut hasher);
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from(".local/share"))
                .join("chatsort")
                .join(format!("{:016x}", hasher.finish()))
                .join("settings.json")
        } else {
            archive_root.join(".chatsort").join("settings.json")
        }
    }
}
