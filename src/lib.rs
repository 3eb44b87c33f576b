//! simplefs: an in-memory hierarchical namespace of files and directories,
//! addressed by slash-separated paths and indexed per directory by a custom
//! open-addressing hash table.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, single-threaded namespace core that a command layer can
//!   drive through a handful of operations (create, delete, read, write,
//!   find), with every structural limit checked in one place.
//! - Layers:
//!   - HashIndex<V, S>: string-keyed open-addressing table with linear
//!     probing, load-factor-triggered doubling and backward-shift deletion.
//!     Knows nothing about files.
//!   - Node: name, depth, parent id and a closed payload
//!     (`Directory(HashIndex<NodeId>)` or `File(Vec<u8>)`).
//!   - Namespace: arena of nodes plus lifecycle operations; path resolution
//!     (`path`) and recursive name search (`search`) are implemented on it.
//!
//! Constraints
//! - Single-threaded, synchronous. No locking.
//! - Limits (defaults): 1024 children per directory, 255-byte names,
//!   depth 255 with the root at depth 0.
//! - Directory entries are insert-only-if-absent; duplicates fail.
//!
//! Ownership
//! - The `Namespace` owns every node in a `SlotMap` arena. Directories map
//!   child names to `NodeId`s and children hold their parent's `NodeId`, so
//!   the parent/child cycle exists only as ids.
//! - Deleted ids are generational: they go stale instead of aliasing nodes
//!   created later. Every operation taking a `NodeId` reports
//!   `NamespaceError::StaleNode` for them.
//! - Recursive deletion restarts an index cursor after each child removal,
//!   because backward-shift deletion moves entries between slots.
//!
//! Hashing
//! - Entries store their 64-bit hash, computed once on insert. Placement,
//!   resize and shift-deletion all use the stored hash.
//! - The default hasher is a deterministic Murmur-style `MurmurState`; the
//!   index is generic over `BuildHasher` so tests can force collisions.
//!
//! Ordering
//! - Sibling order (iteration, recursive delete, search) is physical slot
//!   order, which depends on the hash and changes when a table grows.
//!   `Namespace::find_sorted` sorts at the boundary for stable output.
//!
//! Notes and non-goals
//! - No persistence, links, permissions or streaming content.
//! - Allocation failure aborts; there is no recoverable out-of-memory path.
//! - The command language and its text framing live outside this crate.

mod error;
pub mod hash;
pub mod hash_index;
mod hash_index_proptest;
mod limits;
mod namespace;
mod node;
pub mod path;
mod search;

// Public surface
pub use error::{NamespaceError, Result};
pub use hash::MurmurState;
pub use hash_index::{Cursor, HashIndex, InsertError};
pub use limits::{Limits, MAX_DEPTH, MAX_NAMELENGTH, MAX_NODES};
pub use namespace::Namespace;
pub use node::{NodeId, NodeKind};
pub use path::{ResolveMode, Resolved};
