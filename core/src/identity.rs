//! Sibling identity.
//!
//! Every child of a node is identified among its siblings by a [`Key`]: its node type
//! paired with an integer id. Ids are either supplied by the caller, which keeps them
//! stable across insertions and reorders, or derived from position by counting the
//! children of the same type that came before.
//!
//! The [`IdentityResolver`] owns the per-type counters for one parent. Counters only
//! live for a single pass: position-derived ids are recomputed from scratch every
//! time the children of a node are walked.

use core::fmt;
use std::collections::HashMap;

use crate::NodeType;

/// Identifies a child among its siblings across passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    node_type: NodeType,
    id: i64,
}

impl Key {
    /// Creates a key from its parts.
    #[must_use]
    pub const fn new(node_type: NodeType, id: i64) -> Self {
        Self { node_type, id }
    }

    /// Returns the node type half of the key.
    #[must_use]
    pub const fn node_type(self) -> NodeType {
        self.node_type
    }

    /// Returns the id half of the key.
    #[must_use]
    pub const fn id(self) -> i64 {
        self.id
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.node_type, self.id)
    }
}

/// Hands out ids to the children of a single parent.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    ceilings: HashMap<NodeType, i64>,
}

impl IdentityResolver {
    /// Creates a resolver with no ids handed out yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the id of the next child of type `node_type`.
    ///
    /// An explicit id is returned unchanged and raises the ceiling for its type, so
    /// later position-derived ids never collide with it. Without one, the ceiling is
    /// bumped and the new value returned; the first derived id of a type is `0`.
    ///
    /// Earlier derived ids are not revisited: an explicit id equal to one already
    /// handed out produces a duplicate key, which the reconciler rejects.
    pub fn resolve(&mut self, node_type: NodeType, explicit: Option<i64>) -> i64 {
        match explicit {
            Some(id) => {
                // Derived ids start at 0 even after a negative explicit id.
                self.ceilings
                    .entry(node_type)
                    .and_modify(|ceiling| *ceiling = (*ceiling).max(id))
                    .or_insert(id.max(-1));
                id
            }
            None => *self
                .ceilings
                .entry(node_type)
                .and_modify(|ceiling| *ceiling = ceiling.saturating_add(1))
                .or_insert(0),
        }
    }

    /// Resolves the full key of the next child of type `node_type`.
    pub fn resolve_key(&mut self, node_type: NodeType, explicit: Option<i64>) -> Key {
        Key::new(node_type, self.resolve(node_type, explicit))
    }

    /// Forgets every counter, ready for the next pass over the same parent.
    pub fn reset(&mut self) {
        self.ceilings.clear();
    }
}
