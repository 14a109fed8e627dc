//! Category Selection
//!
//! Selecting a category pulls in its whole ancestor chain ("this product
//! lives inside these categories"). Deselecting removes the category and
//! its entire subtree. Ancestors are never removed by a deselect, even if
//! they end up with no selected descendant.

use super::CategoryTree;
use std::collections::BTreeSet;

/// Set of selected category ids.
///
/// Ids that are not (or no longer) in the current tree are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    selected: BTreeSet<i64>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection seeded from a product's existing categories (edit flow)
    pub fn seeded(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    /// Flip `id`, keeping the set consistent with `tree`.
    ///
    /// Returns `true` if `id` is selected afterwards.
    pub fn toggle(&mut self, id: i64, tree: &CategoryTree) -> bool {
        if self.selected.remove(&id) {
            let cascade = tree.descendants_of(id);
            self.selected.retain(|c| !cascade.contains(c));
            tracing::debug!(id, removed_descendants = cascade.len(), "Category deselected");
            false
        } else {
            let ancestors = tree.ancestors_of(id);
            tracing::debug!(id, ancestors = ?ancestors, "Category selected");
            self.selected.insert(id);
            self.selected.extend(ancestors);
            true
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending order
    pub fn ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}
