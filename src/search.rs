//! Recursive search by node name.

use crate::error::{NamespaceError, Result};
use crate::hash_index::Cursor;
use crate::namespace::Namespace;
use crate::node::NodeId;

impl Namespace {
    /// Absolute paths of every node named `name`, in pre-order traversal
    /// order. Sibling order follows index slots, not creation order.
    pub fn find_by_name(&self, name: &str) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_matches(self.root(), name, &mut found);
        self.paths_of(&found)
    }

    /// [`find_by_name`](Self::find_by_name) sorted lexicographically.
    pub fn find_sorted(&self, name: &str) -> Vec<String> {
        let mut paths = self.find_by_name(name);
        paths.sort_unstable();
        paths
    }

    /// Ids of every node named `name` strictly below the directory `start`.
    pub fn find_nodes(&self, start: NodeId, name: &str) -> Result<Vec<NodeId>> {
        if self.node(start)?.children().is_none() {
            return Err(NamespaceError::NotADirectory(self.path(start)?));
        }
        let mut found = Vec::new();
        self.collect_matches(start, name, &mut found);
        Ok(found)
    }

    /// Like [`find_by_name`](Self::find_by_name), rooted at `start`.
    pub fn find_in(&self, start: NodeId, name: &str) -> Result<Vec<String>> {
        let found = self.find_nodes(start, name)?;
        Ok(self.paths_of(&found))
    }

    fn paths_of(&self, ids: &[NodeId]) -> Vec<String> {
        ids.iter().filter_map(|&id| self.path(id).ok()).collect()
    }

    // Pre-order walk; each frame keeps its own cursor so siblings resume
    // where they left off once a subtree is done.
    fn collect_matches(&self, start: NodeId, name: &str, found: &mut Vec<NodeId>) {
        let mut stack = vec![(start, Cursor::new())];
        while let Some((dir, cursor)) = stack.last_mut() {
            // Index keys equal child names.
            let next = self
                .node(*dir)
                .ok()
                .and_then(|n| n.children())
                .and_then(|c| c.iterate(cursor))
                .map(|(child_name, &child)| (child_name == name, child));
            match next {
                Some((matched, child)) => {
                    if matched {
                        found.push(child);
                    }
                    stack.push((child, Cursor::new()));
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}
