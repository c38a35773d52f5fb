//! Tag canonicalization.
//!
//! A canonical tag is lower-cased, NFC-normalized, has whitespace runs
//! replaced by `-`, and always lives under a known namespace (`misc/` by
//! default). Two tags are equal iff their canonical forms are equal.

use crate::config::TagConfig;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Namespace rules applied during canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRules {
    root: String,
    namespaces: Vec<String>,
}

impl TagRules {
    /// Build rules from a root namespace and additional known namespaces.
    ///
    /// The root is always treated as a known namespace, which keeps
    /// canonicalization idempotent.
    pub fn new(root: &str, namespaces: &[String]) -> Self {
        let root = clean_namespace(root);
        let root = if root.is_empty() {
            "misc".to_string()
        } else {
            root
        };

        let mut known = vec![root.clone()];
        for ns in namespaces {
            let ns = clean_namespace(ns);
            if !ns.is_empty() && !known.contains(&ns) {
                known.push(ns);
            }
        }

        Self {
            root,
            namespaces: known,
        }
    }

    fn is_rooted(&self, tag: &str) -> bool {
        self.namespaces.iter().any(|ns| {
            tag.strip_prefix(ns.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .is_some_and(|rest| !rest.is_empty())
        })
    }
}

impl Default for TagRules {
    fn default() -> Self {
        Self::from(&TagConfig::default())
    }
}

impl From<&TagConfig> for TagRules {
    fn from(config: &TagConfig) -> Self {
        Self::new(&config.root, &config.namespaces)
    }
}

fn clean_namespace(ns: &str) -> String {
    ns.trim()
        .trim_matches('/')
        .to_lowercase()
        .nfc()
        .collect()
}

/// Canonicalize one tag. Returns `None` for tags that are empty after cleanup.
pub fn canonicalize(raw: &str, rules: &TagRules) -> Option<String> {
    let lowered: String = raw.to_lowercase().nfc().collect();
    let stripped = lowered.trim_start_matches(|c: char| c == '#' || c == '/' || c.is_whitespace());

    let joined = stripped.split_whitespace().collect::<Vec<_>>().join("-");
    let tag = joined.trim_end_matches('/');
    if tag.is_empty() {
        return None;
    }

    if rules.is_rooted(tag) {
        Some(tag.to_string())
    } else {
        Some(format!("{}/{}", rules.root, tag))
    }
}

/// Canonicalize a tag list, dropping empties and later duplicates.
pub fn canonical_list<I, S>(tags: I, rules: &TagRules) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter_map(|t| canonicalize(t.as_ref(), rules))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
