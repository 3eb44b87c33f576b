//! Structural limits enforced when creating nodes.

/// Maximum live children of one directory.
pub const MAX_NODES: usize = 1024;
/// Maximum length of a node name, in bytes.
pub const MAX_NAMELENGTH: usize = 255;
/// Maximum node depth; the root sits at depth 0.
pub const MAX_DEPTH: usize = 255;

/// Limits a `Namespace` checks before creating a node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Limits {
    /// Maximum live children of one directory.
    pub max_nodes: usize,
    /// Maximum name length, in bytes.
    pub max_name_length: usize,
    /// Depth a parent must stay below to accept children.
    pub max_depth: usize,
}

impl Limits {
    pub const fn new(max_nodes: usize, max_name_length: usize, max_depth: usize) -> Self {
        Self {
            max_nodes,
            max_name_length,
            max_depth,
        }
    }

    pub const fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub const fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(MAX_NODES, MAX_NAMELENGTH, MAX_DEPTH)
    }
}
