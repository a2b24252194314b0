//! The reconciler's retained twin of the element tree.

use core::{any::Any, fmt};
use std::collections::HashMap;

use crate::{IdentityResolver, Key, NodeHandle, NodeType, element::ElementBody};

/// Binds the element that produced a host node to that node and its reconciled
/// children.
///
/// Owned exclusively by the [`Reconciler`](crate::Reconciler); callers only get
/// read access between passes.
pub struct PopulatedElement<A: ?Sized + 'static> {
    pub(crate) key: Key,
    pub(crate) node: NodeHandle,
    pub(crate) body: Box<dyn ElementBody<A>>,
    pub(crate) children: HashMap<Key, Self>,
    pub(crate) order: Vec<Key>,
    pub(crate) ids: IdentityResolver,
}

impl<A: ?Sized + 'static> PopulatedElement<A> {
    pub(crate) fn new(key: Key, node: NodeHandle, body: Box<dyn ElementBody<A>>) -> Self {
        Self {
            key,
            node,
            body,
            children: HashMap::new(),
            order: Vec::new(),
            ids: IdentityResolver::new(),
        }
    }

    /// Returns the key this element was reconciled under.
    #[must_use]
    pub const fn key(&self) -> Key {
        self.key
    }

    /// Returns the node type.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.key.node_type()
    }

    /// Returns the bound host node.
    #[must_use]
    pub const fn node(&self) -> NodeHandle {
        self.node
    }

    /// Returns the properties last applied to the node, if they are of type `P`.
    #[must_use]
    pub fn props<P: 'static>(&self) -> Option<&P> {
        self.body.props().downcast_ref()
    }

    pub(crate) fn props_any(&self) -> &dyn Any {
        self.body.props()
    }

    /// Returns the child reconciled under `key`.
    #[must_use]
    pub fn child(&self, key: &Key) -> Option<&Self> {
        self.children.get(key)
    }

    /// Iterates over the children in the order they were last declared.
    pub fn children(&self) -> impl Iterator<Item = &Self> + '_ {
        self.order.iter().filter_map(|key| self.children.get(key))
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts this element and every descendant.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.values().map(Self::subtree_len).sum::<usize>()
    }

    /// Visits the host node of this element and of every descendant, parents first.
    pub fn for_each_node(&self, f: &mut impl FnMut(NodeHandle)) {
        f(self.node);
        for child in self.children() {
            child.for_each_node(f);
        }
    }
}

impl<A: ?Sized + 'static> fmt::Debug for PopulatedElement<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopulatedElement")
            .field("key", &self.key)
            .field("node", &self.node)
            .field("children", &self.children().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
