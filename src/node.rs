//! Namespace nodes: a name, a depth, a parent link and a closed payload.

use crate::hash_index::HashIndex;

slotmap::new_key_type! {
    /// Generational id of a node in a [`Namespace`](crate::Namespace) arena.
    /// Ids of deleted nodes never alias nodes created later.
    pub struct NodeId;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Directory,
    File,
}

#[derive(Debug)]
pub(crate) enum Payload {
    /// Child name -> child id. Keys always equal the child's `name`.
    Directory(HashIndex<NodeId>),
    File(Vec<u8>),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) depth: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) payload: Payload,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            name: String::new(),
            depth: 0,
            parent: None,
            payload: Payload::Directory(HashIndex::new()),
        }
    }

    pub(crate) fn child(name: &str, kind: NodeKind, parent: NodeId, parent_depth: usize) -> Self {
        let payload = match kind {
            NodeKind::Directory => Payload::Directory(HashIndex::new()),
            NodeKind::File => Payload::File(Vec::new()),
        };
        Self {
            name: name.to_owned(),
            depth: parent_depth + 1,
            parent: Some(parent),
            payload,
        }
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match self.payload {
            Payload::Directory(_) => NodeKind::Directory,
            Payload::File(_) => NodeKind::File,
        }
    }

    pub(crate) fn children(&self) -> Option<&HashIndex<NodeId>> {
        match &self.payload {
            Payload::Directory(index) => Some(index),
            Payload::File(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut HashIndex<NodeId>> {
        match &mut self.payload {
            Payload::Directory(index) => Some(index),
            Payload::File(_) => None,
        }
    }
}
