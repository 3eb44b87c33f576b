//! Namespace: the arena that owns every node, plus lifecycle operations.
//!
//! Directories index their children by name in a [`HashIndex`] of
//! [`NodeId`]s; children point back at their parent by id. The arena is the
//! only owner, so freeing a node is a single `SlotMap::remove` once its
//! subtree and its parent's index entry are gone.

use crate::error::{NamespaceError, Result};
use crate::hash_index::Cursor;
use crate::limits::Limits;
use crate::node::{Node, NodeId, NodeKind, Payload};
use crate::path::{ResolveMode, Resolved};
use slotmap::SlotMap;

pub struct Namespace {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    limits: Limits,
}

impl Namespace {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::root());
        Self {
            nodes,
            root,
            limits,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(NamespaceError::StaleNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(NamespaceError::StaleNode)
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind> {
        self.node(id).map(Node::kind)
    }

    pub fn name(&self, id: NodeId) -> Result<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn depth(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(|n| n.depth)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.node(id).map(|n| n.parent)
    }

    /// Look up a direct child of `dir` by name.
    pub fn child(&self, dir: NodeId, name: &str) -> Result<Option<NodeId>> {
        let node = self.node(dir)?;
        let children = node
            .children()
            .ok_or_else(|| NamespaceError::NotADirectory(self.path_of(dir)))?;
        Ok(children.get(name).copied())
    }

    pub fn child_count(&self, dir: NodeId) -> Result<usize> {
        let node = self.node(dir)?;
        node.children()
            .map(|c| c.len())
            .ok_or_else(|| NamespaceError::NotADirectory(self.path_of(dir)))
    }

    /// Children of `dir` in index slot order, which is not creation order.
    pub fn children(&self, dir: NodeId) -> Result<impl Iterator<Item = (&str, NodeId)> + '_> {
        let node = self.node(dir)?;
        let children = node
            .children()
            .ok_or_else(|| NamespaceError::NotADirectory(self.path_of(dir)))?;
        Ok(children.iter().map(|(name, &id)| (name, id)))
    }

    /// Create an empty file or directory named `name` inside `parent`.
    pub fn create(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Result<NodeId> {
        let limits = self.limits;
        let parent_node = self.node(parent)?;
        let children = parent_node
            .children()
            .ok_or_else(|| NamespaceError::NotADirectory(self.path_of(parent)))?;

        if children.len() >= limits.max_nodes {
            return Err(NamespaceError::DirectoryFull {
                max: limits.max_nodes,
            });
        }
        if name.len() > limits.max_name_length {
            return Err(NamespaceError::NameTooLong {
                len: name.len(),
                max: limits.max_name_length,
            });
        }
        if parent_node.depth >= limits.max_depth {
            return Err(NamespaceError::DepthExceeded {
                max: limits.max_depth,
            });
        }
        if !is_valid_name(name) {
            return Err(NamespaceError::InvalidName(name.to_owned()));
        }
        if children.contains_key(name) {
            return Err(NamespaceError::AlreadyExists(join(&self.path_of(parent), name)));
        }

        let depth = parent_node.depth;
        let id = self.nodes.insert(Node::child(name, kind, parent, depth));
        let inserted = self
            .node_mut(parent)?
            .children_mut()
            .map(|c| c.set(name, id).is_ok())
            .unwrap_or(false);
        if !inserted {
            self.nodes.remove(id);
            return Err(NamespaceError::AlreadyExists(join(&self.path_of(parent), name)));
        }
        log::debug!("created {:?} {:?} at depth {}", kind, name, depth + 1);
        Ok(id)
    }

    /// File content, or `None` for directories and stale ids.
    pub fn content(&self, id: NodeId) -> Option<&[u8]> {
        match &self.nodes.get(id)?.payload {
            Payload::File(bytes) => Some(bytes),
            Payload::Directory(_) => None,
        }
    }

    /// Replace the whole content of a file.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<Vec<u8>>) -> Result<()> {
        let is_file = self.node(id)?.kind() == NodeKind::File;
        if !is_file {
            return Err(NamespaceError::NotAFile(self.path_of(id)));
        }
        if let Payload::File(bytes) = &mut self.node_mut(id)?.payload {
            *bytes = content.into();
        }
        Ok(())
    }

    /// Delete a node. Non-empty directories need `recursive`, in which case
    /// the whole subtree goes first.
    pub fn delete(&mut self, id: NodeId, recursive: bool) -> Result<()> {
        let node = self.node(id)?;
        if node.parent.is_none() {
            return Err(NamespaceError::RootNotDeletable);
        }
        if let Some(children) = node.children() {
            if !children.is_empty() && !recursive {
                return Err(NamespaceError::DirectoryNotEmpty(self.path_of(id)));
            }
        }
        log::debug!("deleting {} (recursive: {})", self.path_of(id), recursive);
        self.delete_subtree(id);
        Ok(())
    }

    /// Release every node except the root, leaving an empty namespace.
    pub fn clear(&mut self) {
        let root = self.root;
        self.drain_children(root);
        debug_assert_eq!(self.nodes.len(), 1);
    }

    fn delete_subtree(&mut self, id: NodeId) {
        self.drain_children(id);
        self.unlink(id);
    }

    // Post-order walk on an explicit stack so depth is bounded by the heap,
    // not the call stack. `dir` itself is kept.
    fn drain_children(&mut self, dir: NodeId) {
        let mut stack = vec![dir];
        while let Some(&current) = stack.last() {
            match self.first_child(current) {
                Some(child) => stack.push(child),
                None => {
                    stack.pop();
                    if current != dir {
                        self.unlink(current);
                    }
                }
            }
        }
    }

    // Always scans from slot 0: unlinking a child shifts its siblings, so a
    // cursor kept across removals could skip one.
    fn first_child(&self, dir: NodeId) -> Option<NodeId> {
        let mut cursor = Cursor::new();
        self.nodes
            .get(dir)
            .and_then(Node::children)
            .and_then(|c| c.iterate(&mut cursor))
            .map(|(_, &child)| child)
    }

    fn unlink(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        if let Some(index) = node
            .parent
            .and_then(|p| self.nodes.get_mut(p))
            .and_then(Node::children_mut)
        {
            index.remove(&node.name);
        }
    }

    /// Absolute path of a node; the root is `/`.
    pub fn path(&self, id: NodeId) -> Result<String> {
        let mut segments = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            segments.push(current.name.as_str());
            current = self.node(parent)?;
        }
        if segments.is_empty() {
            return Ok("/".to_string());
        }
        let len: usize = segments.iter().map(|s| s.len() + 1).sum();
        let mut path = String::with_capacity(len);
        for segment in segments.iter().rev() {
            path.push('/');
            path.push_str(segment);
        }
        Ok(path)
    }

    // Path for error messages; ids here were validated by the caller.
    fn path_of(&self, id: NodeId) -> String {
        self.path(id).unwrap_or_default()
    }

    /// Resolve `path` from the root to an existing node.
    pub fn lookup(&self, path: &str) -> Result<NodeId> {
        match self.resolve(self.root, path, ResolveMode::Existing)? {
            Resolved::Node(id) => Ok(id),
            Resolved::Pending { .. } => Err(NamespaceError::PathNotFound(path.to_owned())),
        }
    }

    /// Create the node named by the last component of `path`; every earlier
    /// component must already exist.
    pub fn create_path(&mut self, path: &str, kind: NodeKind) -> Result<NodeId> {
        match self.resolve(self.root, path, ResolveMode::CreateTarget)? {
            Resolved::Pending { parent, name } => self.create(parent, name, kind),
            Resolved::Node(id) => Err(NamespaceError::AlreadyExists(self.path_of(id))),
        }
    }

    pub fn read_path(&self, path: &str) -> Result<&[u8]> {
        let id = self.lookup(path)?;
        self.content(id)
            .ok_or_else(|| NamespaceError::NotAFile(self.path_of(id)))
    }

    /// Replace a file's content; returns the number of bytes written.
    pub fn write_path(&mut self, path: &str, content: impl Into<Vec<u8>>) -> Result<usize> {
        let id = self.lookup(path)?;
        let content: Vec<u8> = content.into();
        let written = content.len();
        self.set_content(id, content)?;
        Ok(written)
    }

    pub fn delete_path(&mut self, path: &str, recursive: bool) -> Result<()> {
        let id = self.lookup(path)?;
        self.delete(id, recursive)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Namespace")
            .field("nodes", &self.nodes.len())
            .field("limits", &self.limits)
            .finish()
    }
}

/// Names must survive a round trip through path resolution.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c == '/' || c.is_ascii_whitespace())
}

fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}
