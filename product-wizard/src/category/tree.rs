//! Category Tree
//!
//! Arena-backed parent/child index over a flat list of [`CategoryRecord`]s.
//! Nodes live in a `Vec` and link to each other by index; every walk is an
//! explicit loop, so malformed (cyclic) input terminates instead of
//! recursing forever.

use shared::models::CategoryRecord;
use std::collections::{HashMap, HashSet};

/// Tree node: the record plus arena links
#[derive(Debug, Clone)]
struct CategoryNode {
    record: CategoryRecord,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Read-only category hierarchy
///
/// There are no mutation methods; when the record list changes the tree is
/// rebuilt with [`CategoryTree::build`].
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: Vec<CategoryNode>,
    /// category id -> arena index
    index: HashMap<i64, usize>,
    roots: Vec<usize>,
}

impl CategoryTree {
    /// Build the tree in O(n).
    ///
    /// Records without a parent are roots. A record whose parent is missing
    /// from `records` (or is the record itself) becomes an orphan root.
    /// Roots and children keep input order. For duplicate ids the first
    /// record wins.
    pub fn build(records: impl IntoIterator<Item = CategoryRecord>) -> Self {
        let mut nodes: Vec<CategoryNode> = Vec::new();
        let mut index = HashMap::new();

        for record in records {
            if index.contains_key(&record.id) {
                tracing::warn!(id = record.id, name = %record.name, "Duplicate category id ignored");
                continue;
            }
            index.insert(record.id, nodes.len());
            nodes.push(CategoryNode {
                record,
                parent: None,
                children: Vec::new(),
            });
        }

        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            let parent = nodes[i]
                .record
                .parent_id
                .and_then(|pid| index.get(&pid).copied())
                .filter(|&p| p != i);

            match parent {
                Some(p) => {
                    nodes[i].parent = Some(p);
                    nodes[p].children.push(i);
                }
                None => {
                    if let Some(pid) = nodes[i].record.parent_id {
                        tracing::debug!(id = nodes[i].record.id, parent_id = pid, "Orphan category promoted to root");
                    }
                    roots.push(i);
                }
            }
        }

        Self {
            nodes,
            index,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: i64) -> Option<&CategoryRecord> {
        self.index.get(&id).map(|&i| &self.nodes[i].record)
    }

    /// Root records in input order (orphans included)
    pub fn roots(&self) -> impl Iterator<Item = &CategoryRecord> {
        self.roots.iter().map(|&i| &self.nodes[i].record)
    }

    /// Direct children of `id` in input order; empty for leaves and unknown ids
    pub fn children_of(&self, id: i64) -> Vec<&CategoryRecord> {
        self.index
            .get(&id)
            .map(|&i| {
                self.nodes[i]
                    .children
                    .iter()
                    .map(|&c| &self.nodes[c].record)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ancestor ids of `id`, nearest parent first.
    ///
    /// Empty for roots and unknown ids.
    pub fn ancestors_of(&self, id: i64) -> Vec<i64> {
        let Some(&start) = self.index.get(&id) else {
            return Vec::new();
        };

        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut current = self.nodes[start].parent;
        while let Some(p) = current {
            if !seen.insert(p) {
                break;
            }
            ancestors.push(self.nodes[p].record.id);
            current = self.nodes[p].parent;
        }
        ancestors
    }

    /// Every id in the subtree below `id`, excluding `id` itself.
    ///
    /// Empty for leaves and unknown ids.
    pub fn descendants_of(&self, id: i64) -> HashSet<i64> {
        let mut descendants = HashSet::new();
        let Some(&start) = self.index.get(&id) else {
            return descendants;
        };

        let mut visited = HashSet::from([start]);
        let mut stack: Vec<usize> = self.nodes[start].children.clone();
        while let Some(i) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }
            descendants.insert(self.nodes[i].record.id);
            stack.extend(self.nodes[i].children.iter().copied());
        }
        descendants
    }

    /// Breadcrumb names from the root down to `id` (inclusive).
    pub fn path_names(&self, id: i64) -> Vec<String> {
        let Some(record) = self.get(id) else {
            return Vec::new();
        };
        let mut names: Vec<String> = self
            .ancestors_of(id)
            .into_iter()
            .filter_map(|a| self.get(a).map(|r| r.name.clone()))
            .collect();
        names.reverse();
        names.push(record.name.clone());
        names
    }

    /// Depth-first listing with depth, for indented pickers.
    ///
    /// Nodes on a parent cycle are unreachable from any root and are not listed.
    pub fn flatten(&self) -> Vec<(usize, &CategoryRecord)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut visited = HashSet::new();
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&r| (r, 0)).collect();

        while let Some((i, depth)) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }
            out.push((depth, &self.nodes[i].record));
            stack.extend(self.nodes[i].children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> CategoryTree {
        // Books(1)
        // ├── Fiction(2)
        // │   ├── SciFi(4)
        // │   └── Fantasy(5)
        // └── NonFiction(3)
        // Toys(6)
        CategoryTree::build(vec![
            CategoryRecord::root(1, "Books"),
            CategoryRecord::child(2, "Fiction", 1),
            CategoryRecord::child(3, "NonFiction", 1),
            CategoryRecord::child(4, "SciFi", 2),
            CategoryRecord::child(5, "Fantasy", 2),
            CategoryRecord::root(6, "Toys"),
        ])
    }

    #[test]
    fn test_build_roots_and_children() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 6);
        let roots: Vec<i64> = tree.roots().map(|r| r.id).collect();
        assert_eq!(roots, vec![1, 6]);

        let children: Vec<i64> = tree.children_of(2).iter().map(|r| r.id).collect();
        assert_eq!(children, vec![4, 5]);
        assert!(tree.children_of(4).is_empty());
        assert!(tree.children_of(99).is_empty());
    }

    #[test]
    fn test_child_before_parent_in_input() {
        let tree = CategoryTree::build(vec![
            CategoryRecord::child(2, "SciFi", 1),
            CategoryRecord::root(1, "Fiction"),
        ]);
        let roots: Vec<i64> = tree.roots().map(|r| r.id).collect();
        assert_eq!(roots, vec![1]);
        assert_eq!(tree.ancestors_of(2), vec![1]);
    }

    #[test]
    fn test_orphan_becomes_root() {
        let tree = CategoryTree::build(vec![
            CategoryRecord::root(1, "Books"),
            CategoryRecord::child(7, "Lost", 42),
        ]);
        let roots: Vec<i64> = tree.roots().map(|r| r.id).collect();
        assert_eq!(roots, vec![1, 7]);
        assert!(tree.ancestors_of(7).is_empty());
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let tree = CategoryTree::build(vec![
            CategoryRecord::root(1, "Books"),
            CategoryRecord::root(1, "Shadow"),
        ]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(1).unwrap().name, "Books");
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let tree = sample_tree();
        assert_eq!(tree.ancestors_of(4), vec![2, 1]);
        assert_eq!(tree.ancestors_of(1), Vec::<i64>::new());
        assert_eq!(tree.ancestors_of(404), Vec::<i64>::new());
    }

    #[test]
    fn test_descendants_exclude_self() {
        let tree = sample_tree();
        assert_eq!(tree.descendants_of(1), HashSet::from([2, 3, 4, 5]));
        assert_eq!(tree.descendants_of(2), HashSet::from([4, 5]));
        assert!(tree.descendants_of(4).is_empty());
        assert!(tree.descendants_of(404).is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        // 1 -> 2 -> 3 -> 1
        let tree = CategoryTree::build(vec![
            CategoryRecord::child(1, "A", 3),
            CategoryRecord::child(2, "B", 1),
            CategoryRecord::child(3, "C", 2),
        ]);
        assert_eq!(tree.roots().count(), 0);
        assert_eq!(tree.ancestors_of(1), vec![3, 2]);
        assert_eq!(tree.descendants_of(1), HashSet::from([2, 3]));
        assert!(tree.flatten().is_empty());
    }

    #[test]
    fn test_self_parent_is_root() {
        let tree = CategoryTree::build(vec![CategoryRecord::child(5, "Loop", 5)]);
        assert_eq!(tree.roots().count(), 1);
        assert!(tree.ancestors_of(5).is_empty());
        assert!(tree.descendants_of(5).is_empty());
    }

    #[test]
    fn test_path_names() {
        let tree = sample_tree();
        assert_eq!(tree.path_names(5), vec!["Books", "Fiction", "Fantasy"]);
        assert_eq!(tree.path_names(6), vec!["Toys"]);
        assert!(tree.path_names(404).is_empty());
    }

    #[test]
    fn test_flatten_depth_first() {
        let tree = sample_tree();
        let flat: Vec<(usize, i64)> = tree.flatten().into_iter().map(|(d, r)| (d, r.id)).collect();
        assert_eq!(flat, vec![(0, 1), (1, 2), (2, 4), (2, 5), (1, 3), (0, 6)]);
    }

    #[test]
    fn test_empty_tree() {
        let tree = CategoryTree::build(Vec::new());
        assert!(tree.is_empty());
        assert!(tree.flatten().is_empty());
        assert!(!tree.contains(1));
    }
}
