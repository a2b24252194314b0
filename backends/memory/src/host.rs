//! The arena-backed host.

use core::fmt::Write as _;

use scenegraft_controls::{Alignment, ControlHost, Size};
use scenegraft_core::{
    AnyCallback, EventName, NodeAdapter, NodeHandle, NodeType, Reconciler, Result,
};
use tracing::{trace, warn};

use crate::{HostOp, NodeRecord, Property};

const VIEWPORT: NodeType = NodeType::new("Viewport");

/// Arena storing a host node graph in memory.
///
/// Handles index the arena directly and are never reused, so a stale handle reliably
/// resolves to nothing. A viewport node exists from the start and serves as the
/// default container.
#[derive(Debug)]
pub struct MemoryHost {
    nodes: Vec<Option<NodeRecord>>,
    viewport: NodeHandle,
    pending: Vec<NodeHandle>,
    ops: Vec<HostOp>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Creates a host holding only its viewport.
    #[must_use]
    pub fn new() -> Self {
        let mut host = Self {
            nodes: Vec::new(),
            viewport: NodeHandle::new(0),
            pending: Vec::new(),
            ops: Vec::new(),
        };
        host.viewport = host.insert(NodeRecord::new(VIEWPORT));
        host
    }

    /// Returns the viewport node.
    #[must_use]
    pub const fn viewport(&self) -> NodeHandle {
        self.viewport
    }

    /// Creates a detached container outside the journal, for rendering into
    /// something other than the viewport.
    pub fn add_container(&mut self, node_type: NodeType) -> NodeHandle {
        self.insert(NodeRecord::new(node_type))
    }

    /// Returns the record of a live node.
    #[must_use]
    pub fn node(&self, node: NodeHandle) -> Option<&NodeRecord> {
        usize::try_from(node.raw())
            .ok()
            .and_then(|index| self.nodes.get(index))
            .and_then(Option::as_ref)
    }

    fn node_mut(&mut self, node: NodeHandle) -> Option<&mut NodeRecord> {
        usize::try_from(node.raw())
            .ok()
            .and_then(|index| self.nodes.get_mut(index))
            .and_then(Option::as_mut)
    }

    /// Returns `true` if `node` has not been destroyed.
    #[must_use]
    pub fn is_alive(&self, node: NodeHandle) -> bool {
        self.node(node).is_some()
    }

    /// Number of live nodes, the viewport included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Returns `true` if no node is alive, which only happens after the viewport
    /// itself was destroyed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the children of `node`, or nothing if it is not alive.
    #[must_use]
    pub fn children(&self, node: NodeHandle) -> &[NodeHandle] {
        self.node(node).map_or(&[], NodeRecord::children)
    }

    /// Returns the text property of `node`.
    #[must_use]
    pub fn text(&self, node: NodeHandle) -> Option<&str> {
        self.node(node).and_then(NodeRecord::text)
    }

    /// Finds a live node by its debug label.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<NodeHandle> {
        self.live().find_map(|(node, record)| (record.label() == Some(label)).then_some(node))
    }

    /// Nodes whose deferred destruction waits for [`flush`](Self::flush).
    #[must_use]
    pub fn pending_destroy(&self) -> &[NodeHandle] {
        &self.pending
    }

    /// Every request received since the journal was last cleared.
    #[must_use]
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Clears the journal.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Returns the journal, leaving it empty.
    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    /// Runs every deferred destruction, returning how many nodes were freed.
    ///
    /// A real host does this once the current frame's event dispatch is over.
    pub fn flush(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending);
        let freed = pending.into_iter().map(|node| self.free(node)).sum();
        if freed > 0 {
            trace!(freed, "flushed deferred destructions");
        }
        freed
    }

    /// Delivers a host event to the reconciler that rendered `node`.
    ///
    /// # Errors
    ///
    /// Propagates the reconciler's dispatch errors, notably
    /// [`UnboundCallback`](scenegraft_core::ReconcileError::UnboundCallback) for a node
    /// whose element is gone.
    pub fn fire<T: 'static>(
        &self,
        reconciler: &Reconciler<Self>,
        node: NodeHandle,
        event: EventName,
        arg: &T,
    ) -> Result<()> {
        trace!(%node, event, "firing event");
        reconciler.dispatch(node, event, arg)
    }

    /// Renders the subtree under `node` as an indented outline, one node per line.
    ///
    /// ```text
    /// Viewport
    ///   VBoxContainer [VBoxContainer#0]
    ///     Label [Label#0] "hello"
    /// ```
    #[must_use]
    pub fn outline(&self, node: NodeHandle) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, node, 0);
        out
    }

    fn write_outline(&self, out: &mut String, node: NodeHandle, depth: usize) {
        let Some(record) = self.node(node) else {
            return;
        };
        let _ = write!(out, "{:indent$}{}", "", record.node_type, indent = depth * 2);
        if let Some(label) = record.label() {
            let _ = write!(out, " [{label}]");
        }
        if let Some(text) = record.text() {
            let _ = write!(out, " {text:?}");
        }
        if record.is_disabled() {
            out.push_str(" (disabled)");
        }
        out.push('\n');
        for &child in record.children() {
            self.write_outline(out, child, depth + 1);
        }
    }

    fn live(&self) -> impl Iterator<Item = (NodeHandle, &NodeRecord)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(index, slot)| {
            let record = slot.as_ref()?;
            Some((NodeHandle::new(index as u64), record))
        })
    }

    fn insert(&mut self, record: NodeRecord) -> NodeHandle {
        let node = NodeHandle::new(self.nodes.len() as u64);
        self.nodes.push(Some(record));
        node
    }

    /// Frees `node` and its descendants, detaching it from a live parent first.
    fn free(&mut self, node: NodeHandle) -> usize {
        let Some(parent) = self.node(node).map(NodeRecord::parent) else {
            warn!(%node, "destroying a node that no longer exists");
            return 0;
        };
        if let Some(siblings) = parent.and_then(|parent| self.node_mut(parent)) {
            siblings.children.retain(|sibling| *sibling != node);
        }

        let mut freed = 0;
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            let Some(slot) = usize::try_from(next.raw())
                .ok()
                .and_then(|index| self.nodes.get_mut(index))
            else {
                continue;
            };
            if let Some(record) = slot.take() {
                stack.extend(record.children);
                freed += 1;
            }
        }
        freed
    }

    fn set(&mut self, node: NodeHandle, property: Property) {
        let Some(record) = self.node_mut(node) else {
            warn!(%node, %property, "setting a property on a node that does not exist");
            return;
        };
        record.properties.insert(property.name(), property.clone());
        self.ops.push(HostOp::Set { node, property });
    }
}

impl NodeAdapter for MemoryHost {
    fn create_node(&mut self, node_type: NodeType) -> NodeHandle {
        let node = self.insert(NodeRecord::new(node_type));
        self.ops.push(HostOp::Create { node, node_type });
        node
    }

    fn destroy_node(&mut self, node: NodeHandle, deferred: bool) {
        self.ops.push(HostOp::Destroy { node, deferred });
        if deferred {
            self.pending.push(node);
        } else {
            self.free(node);
        }
    }

    fn attach_child(&mut self, parent: NodeHandle, child: NodeHandle) {
        if !self.is_alive(parent) {
            warn!(%parent, %child, "attaching to a node that does not exist");
            return;
        }
        let Some(record) = self.node_mut(child) else {
            warn!(%parent, %child, "attaching a node that does not exist");
            return;
        };
        if let Some(previous) = record.parent.replace(parent) {
            warn!(%child, %previous, %parent, "reparenting an attached node");
            if let Some(previous) = self.node_mut(previous) {
                previous.children.retain(|sibling| *sibling != child);
            }
        }
        if let Some(parent) = self.node_mut(parent) {
            parent.children.push(child);
        }
        self.ops.push(HostOp::Attach { parent, child });
    }

    fn detach_child(&mut self, parent: NodeHandle, child: NodeHandle) {
        if let Some(record) = self.node_mut(parent) {
            record.children.retain(|sibling| *sibling != child);
        }
        if let Some(record) = self.node_mut(child) {
            record.parent = None;
        }
        self.ops.push(HostOp::Detach { parent, child });
    }

    fn child_index(&self, parent: NodeHandle, child: NodeHandle) -> Option<usize> {
        self.children(parent).iter().position(|sibling| *sibling == child)
    }

    fn move_child_to_index(&mut self, parent: NodeHandle, child: NodeHandle, index: usize) {
        let Some(record) = self.node_mut(parent) else {
            warn!(%parent, %child, "moving a child of a node that does not exist");
            return;
        };
        let Some(current) = record.children.iter().position(|sibling| *sibling == child) else {
            warn!(%parent, %child, "moving a node that is not a child");
            return;
        };
        record.children.remove(current);
        let index = index.min(record.children.len());
        record.children.insert(index, child);
        self.ops.push(HostOp::Move {
            parent,
            child,
            index,
        });
    }

    fn connect_event(&mut self, node: NodeHandle, event: EventName, callback: &AnyCallback) {
        let Some(record) = self.node_mut(node) else {
            warn!(%node, event, "connecting an event of a node that does not exist");
            return;
        };
        if record.is_connected(event) {
            warn!(%node, event, "event connected twice");
        } else {
            record.events.push(event);
        }
        trace!(%node, event, arg = callback.arg_type(), "connected event");
        self.ops.push(HostOp::Connect { node, event });
    }

    fn disconnect_event(&mut self, node: NodeHandle, event: EventName, _callback: &AnyCallback) {
        if let Some(record) = self.node_mut(node) {
            record.events.retain(|connected| *connected != event);
        }
        self.ops.push(HostOp::Disconnect { node, event });
    }

    fn set_debug_label(&mut self, node: NodeHandle, label: &str) {
        if let Some(record) = self.node_mut(node) {
            record.label = Some(label.to_string());
        }
        self.ops.push(HostOp::Label {
            node,
            label: label.to_string(),
        });
    }
}

impl ControlHost for MemoryHost {
    fn set_text(&mut self, node: NodeHandle, text: &str) {
        self.set(node, Property::Text(text.to_string()));
    }

    fn set_disabled(&mut self, node: NodeHandle, disabled: bool) {
        self.set(node, Property::Disabled(disabled));
    }

    fn set_min_size(&mut self, node: NodeHandle, size: Size) {
        self.set(node, Property::MinSize(size));
    }

    fn set_alignment(&mut self, node: NodeHandle, alignment: Alignment) {
        self.set(node, Property::Alignment(alignment));
    }
}
