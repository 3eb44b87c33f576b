//! Path tokenization and token-by-token resolution.
//!
//! Components are separated by `/` or ASCII whitespace, in any mix; empty
//! components are dropped, so leading, trailing and doubled separators are
//! all ignored.

use crate::error::{NamespaceError, Result};
use crate::namespace::Namespace;
use crate::node::NodeId;

/// Non-empty components of `path`, in order.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split(|c: char| c == '/' || c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResolveMode {
    /// Every component must exist.
    Existing,
    /// The last component may be missing; it is returned as a pending name.
    CreateTarget,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Resolved<'p> {
    /// Every component resolved; this is the terminal node.
    Node(NodeId),
    /// All but the last component resolved; `name` does not exist in `parent`.
    Pending { parent: NodeId, name: &'p str },
}

impl<'p> Resolved<'p> {
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Resolved::Node(id) => Some(id),
            Resolved::Pending { .. } => None,
        }
    }

    pub fn pending_name(&self) -> Option<&'p str> {
        match *self {
            Resolved::Node(_) => None,
            Resolved::Pending { name, .. } => Some(name),
        }
    }
}

impl Namespace {
    /// Walk `path` from `start`. Every node passed through must be a
    /// directory. An empty path never resolves.
    pub fn resolve<'p>(
        &self,
        start: NodeId,
        path: &'p str,
        mode: ResolveMode,
    ) -> Result<Resolved<'p>> {
        let not_found = || NamespaceError::PathNotFound(path.to_owned());
        let mut tokens = components(path).peekable();
        if tokens.peek().is_none() {
            return Err(not_found());
        }

        let mut current = start;
        while let Some(token) = tokens.next() {
            let children = self.node(current)?.children().ok_or_else(not_found)?;
            match children.get(token) {
                Some(&child) => current = child,
                None if mode == ResolveMode::CreateTarget && tokens.peek().is_none() => {
                    return Ok(Resolved::Pending {
                        parent: current,
                        name: token,
                    });
                }
                None => return Err(not_found()),
            }
        }
        Ok(Resolved::Node(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn collect(path: &str) -> Vec<&str> {
        components(path).collect()
    }

    #[test]
    fn split_simple_and_nested() {
        assert_eq!(collect("a"), vec!["a"]);
        assert_eq!(collect("/a/b/c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_ignores_separator_noise() {
        assert_eq!(collect("  /a//b/ \n"), vec!["a", "b"]);
        assert_eq!(collect("\t/a\r\nb"), vec!["a", "b"]);
        assert!(collect("").is_empty());
        assert!(collect("///  ").is_empty());
    }

    fn sample() -> (Namespace, NodeId, NodeId) {
        let mut ns = Namespace::new();
        let d = ns.create(ns.root(), "d", NodeKind::Directory).unwrap();
        let f = ns.create(d, "f", NodeKind::File).unwrap();
        (ns, d, f)
    }

    #[test]
    fn resolves_existing_nodes() {
        let (ns, d, f) = sample();
        let root = ns.root();
        assert_eq!(ns.resolve(root, "/d", ResolveMode::Existing), Ok(Resolved::Node(d)));
        assert_eq!(ns.resolve(root, "/d/f", ResolveMode::Existing), Ok(Resolved::Node(f)));
        assert_eq!(ns.resolve(d, "f", ResolveMode::Existing), Ok(Resolved::Node(f)));
        // An existing target in create mode resolves to the node itself.
        assert_eq!(ns.resolve(root, "/d/f", ResolveMode::CreateTarget), Ok(Resolved::Node(f)));
    }

    #[test]
    fn empty_path_fails() {
        let (ns, _, _) = sample();
        for mode in [ResolveMode::Existing, ResolveMode::CreateTarget] {
            assert!(matches!(
                ns.resolve(ns.root(), " / ", mode),
                Err(NamespaceError::PathNotFound(_))
            ));
        }
    }

    #[test]
    fn create_mode_returns_pending_last_component() {
        let (ns, d, _) = sample();
        let r = ns.resolve(ns.root(), "/d/new", ResolveMode::CreateTarget).unwrap();
        assert_eq!(r, Resolved::Pending { parent: d, name: "new" });
        assert_eq!(r.pending_name(), Some("new"));
        assert_eq!(r.node(), None);
    }

    #[test]
    fn missing_intermediate_fails_in_both_modes() {
        let (ns, _, _) = sample();
        for mode in [ResolveMode::Existing, ResolveMode::CreateTarget] {
            assert!(ns.resolve(ns.root(), "/x/new", mode).is_err());
        }
        assert!(ns.resolve(ns.root(), "/d/new", ResolveMode::Existing).is_err());
    }

    #[test]
    fn cannot_descend_through_file() {
        let (ns, _, _) = sample();
        for mode in [ResolveMode::Existing, ResolveMode::CreateTarget] {
            assert!(matches!(
                ns.resolve(ns.root(), "/d/f/g", mode),
                Err(NamespaceError::PathNotFound(_))
            ));
        }
    }
}
