//! The record of requests a [`MemoryHost`](crate::MemoryHost) received.

use core::fmt;

use scenegraft_core::{EventName, NodeHandle, NodeType};

use crate::Property;

/// One request received by the host, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    /// A node was allocated.
    Create {
        /// The new node.
        node: NodeHandle,
        /// Its type.
        node_type: NodeType,
    },
    /// A node was scheduled for destruction, or destroyed on the spot.
    Destroy {
        /// The destroyed subtree's root.
        node: NodeHandle,
        /// Whether destruction waits for the next [`flush`](crate::MemoryHost::flush).
        deferred: bool,
    },
    /// A child was appended.
    Attach {
        /// The parent.
        parent: NodeHandle,
        /// The appended child.
        child: NodeHandle,
    },
    /// A child was removed from its parent.
    Detach {
        /// The former parent.
        parent: NodeHandle,
        /// The removed child.
        child: NodeHandle,
    },
    /// A child changed position among its siblings.
    Move {
        /// The parent.
        parent: NodeHandle,
        /// The moved child.
        child: NodeHandle,
        /// The requested index.
        index: usize,
    },
    /// An event was connected.
    Connect {
        /// The node emitting the event.
        node: NodeHandle,
        /// The event.
        event: EventName,
    },
    /// An event was disconnected.
    Disconnect {
        /// The node emitting the event.
        node: NodeHandle,
        /// The event.
        event: EventName,
    },
    /// A debug label was set.
    Label {
        /// The labelled node.
        node: NodeHandle,
        /// The label.
        label: String,
    },
    /// A property was written.
    Set {
        /// The node.
        node: NodeHandle,
        /// The new value.
        property: Property,
    },
}

impl HostOp {
    /// Returns `true` for requests that change the shape of the graph: creation,
    /// destruction, attachment, detachment and moves.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Create { .. }
                | Self::Destroy { .. }
                | Self::Attach { .. }
                | Self::Detach { .. }
                | Self::Move { .. }
        )
    }
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { node, node_type } => write!(f, "create {node} ({node_type})"),
            Self::Destroy { node, deferred } if *deferred => write!(f, "queue destroy {node}"),
            Self::Destroy { node, .. } => write!(f, "destroy {node}"),
            Self::Attach { parent, child } => write!(f, "attach {child} to {parent}"),
            Self::Detach { parent, child } => write!(f, "detach {child} from {parent}"),
            Self::Move {
                parent,
                child,
                index,
            } => write!(f, "move {child} to {index} in {parent}"),
            Self::Connect { node, event } => write!(f, "connect {node}.{event}"),
            Self::Disconnect { node, event } => write!(f, "disconnect {node}.{event}"),
            Self::Label { node, label } => write!(f, "label {node} {label:?}"),
            Self::Set { node, property } => write!(f, "set {node} {property}"),
        }
    }
}
