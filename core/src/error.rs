//! Error types raised by the reconciler and the signal binder.
//!
//! Every variant describes a defect in how the caller built its element tree, or a
//! host adapter that broke the node lifecycle contract. None of them are transient:
//! a failed pass is never retried and commits no host mutation.

use thiserror::Error;

use crate::{EventName, Key, NodeHandle};

/// Convenience alias for results produced by this crate.
pub type Result<T, E = ReconcileError> = core::result::Result<T, E>;

/// Errors surfaced by [`Reconciler`](crate::Reconciler) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReconcileError {
    /// Two siblings under the same parent resolved to the same key.
    #[error("duplicate key {key} under {parent}: {first} collides with {second}")]
    DuplicateKey {
        /// Label of the parent whose children collided.
        parent: String,
        /// The key both siblings resolved to.
        key: Key,
        /// Description of the first sibling holding the key.
        first: String,
        /// Description of the sibling that collided with it.
        second: String,
    },
    /// A key matched between passes but the two elements carry different node kinds.
    #[error("key {key} is bound to `{old}` but the new element carries `{new}`")]
    TypeMismatch {
        /// The key shared by both elements.
        key: Key,
        /// Property type of the element that produced the live node.
        old: &'static str,
        /// Property type of the element rendered this pass.
        new: &'static str,
    },
    /// An event fired for a node without a live binding for that event.
    #[error("event `{event}` fired on {node}, which has no bound callback")]
    UnboundCallback {
        /// The node the host reported the event for.
        node: NodeHandle,
        /// The event name.
        event: EventName,
    },
    /// An event fired with an argument of the wrong type for its bound callback.
    #[error("event `{event}` on {node} expects an argument of type `{expected}`")]
    EventArgument {
        /// The node the host reported the event for.
        node: NodeHandle,
        /// The event name.
        event: EventName,
        /// Argument type the bound callback accepts.
        expected: &'static str,
    },
}
