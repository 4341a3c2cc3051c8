//! Favorites store abstraction.
//!
//! Favorites live outside this crate (typically a `localStorage` key holding a JSON
//! array of ids). The core only needs set semantics over place ids, so that is all
//! the [`Favorites`] trait asks for.

use std::collections::BTreeSet;

/// Set of favorited place ids, owned by the host.
///
/// # Implementations
///
/// - [`MemoryFavorites`]: in-process set, used by tests and hosts without storage
pub trait Favorites {
    /// Returns whether `id` is currently favorited.
    fn is_favorite(&self, id: &str) -> bool;

    /// Flips the favorite flag for `id` and returns the new value.
    fn toggle(&mut self, id: &str) -> bool;
}

/// In-memory favorites set.
///
/// # Examples
///
/// ```
/// use placesheet::catalog::{Favorites, MemoryFavorites};
///
/// let mut favs = MemoryFavorites::default();
/// assert!(favs.toggle("kch-1"));
/// assert!(favs.is_favorite("kch-1"));
/// assert!(!favs.toggle("kch-1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFavorites {
    ids: BTreeSet<String>,
}

impl MemoryFavorites {
    /// Seeds the set from existing ids; duplicates collapse.
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Current ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Favorites for MemoryFavorites {
    fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            tracing::debug!(place_id = %id, "favorite removed");
            false
        } else {
            self.ids.insert(id.to_string());
            tracing::debug!(place_id = %id, "favorite added");
            true
        }
    }
}
