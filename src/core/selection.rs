//! The tag-selection state container.
//!
//! An insertion-ordered set of owned strings: membership toggles in and out,
//! and iteration always replays the order in which tags were picked.  This is
//! the one piece of state the whole screen revolves around, so it lives here
//! as a plain container with no UI types anywhere near it.

use super::catalog::TagCatalog;

/// Ordered set of selected tag labels.
///
/// Backed by a `Vec` rather than a hash set so that the "Selected Tags" rail
/// can render tags in the order the user picked them.  Membership checks are
/// linear, which is fine at tag-list scale (tens of entries, not thousands).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `tag`.  Returns `true` if the tag is selected
    /// after the call.
    ///
    /// A removed-then-re-added tag goes to the **end** of the order, exactly
    /// as if the user had picked it fresh.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.remove(tag) {
            false
        } else {
            self.items.push(tag.to_string());
            true
        }
    }

    /// Add `tag` at the end if absent.  Returns `true` if it was inserted.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.items.push(tag.to_string());
        true
    }

    /// Remove `tag` if present, keeping the relative order of the rest.
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        match self.position(tag) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the tag at `index` (rail order).  Out-of-range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.items.iter().any(|t| t == tag)
    }

    /// Position of `tag` in insertion order.
    pub fn position(&self, tag: &str) -> Option<usize> {
        self.items.iter().position(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Drop every selected tag that is not a catalog member.
    ///
    /// Applied once after CLI preselection so `--select typo` can't smuggle
    /// an untoggleable tag into the rail.
    pub fn retain_known(&mut self, catalog: &TagCatalog) {
        self.items.retain(|tag| {
            let known = catalog.position(tag).is_some();
            if !known {
                tracing::debug!("dropping unknown preselected tag {tag:?}");
            }
            known
        });
    }
}
