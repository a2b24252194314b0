//! The boundary between the reconciler and the host node graph.
//!
//! The host owns its nodes. The reconciler only ever holds [`NodeHandle`]s and asks
//! the host, through [`NodeAdapter`], to create, attach, reorder and destroy them.
//! Element factories and update functions reach the host through a [`RenderCtx`],
//! which also carries the signal binder so event properties can be rebound in the
//! same step that copies the rest of the properties onto the node.

use core::fmt;

use tracing::trace;

use crate::{
    NodeType,
    signal::{AnyCallback, BindOutcome, Callback, EventName, SignalBinder},
};

/// Opaque handle to a node living in the host graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Creates a handle from the host's raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the host's raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Host-provided primitives the reconciler drives.
///
/// Implementations are free to honour deferred destruction whenever they like, as
/// long as the node stays valid until the end of the current pass.
pub trait NodeAdapter {
    /// Allocates a detached node of the given type.
    ///
    /// Properties are applied afterwards by the element's factory.
    fn create_node(&mut self, node_type: NodeType) -> NodeHandle;

    /// Destroys a node and everything beneath it, now or at the host's convenience.
    fn destroy_node(&mut self, node: NodeHandle, deferred: bool);

    /// Appends `child` to the children of `parent`.
    fn attach_child(&mut self, parent: NodeHandle, child: NodeHandle);

    /// Removes `child` from the children of `parent` without destroying it.
    fn detach_child(&mut self, parent: NodeHandle, child: NodeHandle);

    /// Returns the current sibling index of `child` under `parent`.
    fn child_index(&self, parent: NodeHandle, child: NodeHandle) -> Option<usize>;

    /// Moves `child` to `index` among the children of `parent`.
    fn move_child_to_index(&mut self, parent: NodeHandle, child: NodeHandle, index: usize);

    /// Wires the host event `event` of `node` to `callback`.
    fn connect_event(&mut self, node: NodeHandle, event: EventName, callback: &AnyCallback);

    /// Removes a connection previously made with [`connect_event`](Self::connect_event).
    fn disconnect_event(&mut self, node: NodeHandle, event: EventName, callback: &AnyCallback);

    /// Attaches a human readable label to a node for debugging tools.
    fn set_debug_label(&mut self, node: NodeHandle, label: &str) {
        let _ = (node, label);
    }
}

/// Context handed to element factories and update functions.
pub struct RenderCtx<'a, A: ?Sized> {
    adapter: &'a mut A,
    signals: &'a mut SignalBinder,
}

impl<'a, A: NodeAdapter + ?Sized> RenderCtx<'a, A> {
    /// Creates a context over a host adapter and a signal binder.
    pub const fn new(adapter: &'a mut A, signals: &'a mut SignalBinder) -> Self {
        Self { adapter, signals }
    }

    /// Returns the host adapter, for property setters the host exposes.
    pub const fn adapter(&mut self) -> &mut A {
        self.adapter
    }

    /// Allocates a fresh node of the given type.
    pub fn create_node(&mut self, node_type: NodeType) -> NodeHandle {
        let node = self.adapter.create_node(node_type);
        trace!(%node, %node_type, "created node");
        node
    }

    /// Brings the binding of `event` on `node` in line with `callback`.
    ///
    /// The host connection is only touched when the logical callback changed since
    /// the previous pass; see [`SignalBinder::bind`].
    pub fn bind<T: 'static>(
        &mut self,
        node: NodeHandle,
        event: EventName,
        callback: Option<&Callback<T>>,
    ) -> BindOutcome {
        self.signals.bind(self.adapter, node, event, callback)
    }
}

impl<A: ?Sized> fmt::Debug for RenderCtx<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCtx")
            .field("signals", &self.signals)
            .finish_non_exhaustive()
    }
}
