//! The catalog of browsable tags.
//!
//! The catalog is fixed for the lifetime of a run: either the built-in demo
//! list, an inline `--tags` list, or a newline-separated file.  Whatever the
//! source, entries are normalized the same way — trimmed, de-duplicated
//! (first occurrence wins), empties dropped — so the rest of the app can
//! treat the list as clean.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default demo catalog shown when no tag source is given.
const BUILTIN_TAGS: &[&str] = &[
    "Rust",
    "TUI",
    "Async",
    "UI/UX",
    "Testing",
    "Unicode",
    "Layout",
    "Tooling",
    "Performance",
    "Navigation",
    "Architecture",
    "State Management",
];

/// Errors from loading a tag file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read tag file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} contains no tags (blank lines and # comments are skipped)")]
    Empty { path: PathBuf },
}

/// The ordered, immutable list of tags the browse grid shows.
#[derive(Debug, Clone)]
pub struct TagCatalog {
    tags: Vec<String>,
}

impl TagCatalog {
    /// The built-in demo catalog.
    pub fn builtin() -> Self {
        Self::from_tags(BUILTIN_TAGS.iter().map(|t| (*t).to_string()))
    }

    /// Build a catalog from raw entries, normalizing as documented on the
    /// module.  May be empty if the input contained nothing usable — callers
    /// decide whether that is an error.
    pub fn from_tags(tags: impl IntoIterator<Item = String>) -> Self {
        let mut out: Vec<String> = Vec::new();
        for raw in tags {
            let tag = raw.trim();
            if tag.is_empty() {
                continue;
            }
            if out.iter().any(|existing| existing == tag) {
                continue; // first occurrence wins
            }
            out.push(tag.to_string());
        }
        Self { tags: out }
    }

    /// Load a newline-separated tag file.  Lines starting with `#` are
    /// comments.  An effectively empty file is an error so the user gets a
    /// message instead of a blank, unusable screen.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_tags(
            contents
                .lines()
                .filter(|line| !line.trim_start().starts_with('#'))
                .map(str::to_string),
        );

        if catalog.is_empty() {
            return Err(CatalogError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!("loaded {} tags from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tags.get(index).map(String::as_str)
    }

    /// Index of `tag` in display order.
    pub fn position(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags in display order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}
