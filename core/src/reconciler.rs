//! The diff/patch engine.
//!
//! [`Reconciler::render`] walks the new element tree alongside the tree retained from
//! the previous pass:
//!
//! 1. Each element either reuses the node bound to the same key under the same parent
//!    (calling the element's update function) or creates a new one (calling its
//!    factory).
//! 2. Children are keyed in declared order by an [`IdentityResolver`] scoped to their
//!    parent, and rendered recursively against the old child with the same key.
//! 3. New nodes are attached under their parent once their own children are built.
//! 4. For reused nodes, children whose key disappeared are detached and queued for
//!    destruction, and surviving children are moved to their declared index, walking
//!    from the last position to the first.
//!
//! Destruction is always the last thing a pass does, so a node that merely changed
//! position is never destroyed by mistake, and a deferred destruction gives the host
//! the chance to finish dispatching callbacks that still reference the node.
//!
//! Before touching the host, the whole new tree is validated against the retained one.
//! A pass that fails validation commits nothing and leaves the retained tree as it was.

use core::{fmt, mem};
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ChurnStats, ChurnTracker, Element, IdentityResolver, Key, NodeAdapter, NodeHandle,
    PopulatedElement, ReconcileError, ReconcilerConfig, RenderCtx, Result,
    signal::{EventName, SignalBinder},
};

struct Mount<A: ?Sized + 'static> {
    container: NodeHandle,
    root: PopulatedElement<A>,
}

/// Keeps a host node graph in sync with a declarative element tree.
///
/// One reconciler drives one root. It must be used from a single thread and is not
/// reentrant: event dispatch happens between passes, never during one.
pub struct Reconciler<A: ?Sized + 'static> {
    config: ReconcilerConfig,
    mount: Option<Mount<A>>,
    signals: SignalBinder,
    churn: ChurnTracker,
}

impl<A: NodeAdapter + ?Sized + 'static> Default for Reconciler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: NodeAdapter + ?Sized + 'static> Reconciler<A> {
    /// Creates a reconciler with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReconcilerConfig::default())
    }

    /// Creates a reconciler with the given configuration.
    #[must_use]
    pub fn with_config(config: ReconcilerConfig) -> Self {
        Self {
            config,
            mount: None,
            signals: SignalBinder::new(config.warn_unstable_callbacks),
            churn: ChurnTracker::new(config.collect_churn),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Turns churn collection on or off, starting with the next pass.
    pub const fn set_collect_churn(&mut self, enabled: bool) {
        self.config.collect_churn = enabled;
        self.churn.set_enabled(enabled);
    }

    /// Counters of the most recent pass. All zero while collection is off.
    #[must_use]
    pub const fn churn(&self) -> ChurnStats {
        self.churn.stats()
    }

    /// Host nodes created by the most recent pass.
    #[must_use]
    pub const fn nodes_created(&self) -> usize {
        self.churn.stats().created
    }

    /// Host nodes destroyed by the most recent pass.
    #[must_use]
    pub const fn nodes_destroyed(&self) -> usize {
        self.churn.stats().destroyed
    }

    /// Returns the retained tree, if something is mounted.
    #[must_use]
    pub fn root(&self) -> Option<&PopulatedElement<A>> {
        self.mount.as_ref().map(|mount| &mount.root)
    }

    /// Returns the host node of the retained root.
    #[must_use]
    pub fn root_node(&self) -> Option<NodeHandle> {
        self.root().map(PopulatedElement::node)
    }

    /// Returns the container the root is attached to.
    #[must_use]
    pub fn container(&self) -> Option<NodeHandle> {
        self.mount.as_ref().map(|mount| mount.container)
    }

    /// Returns `true` if a tree is currently mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Returns the signal binder, for inspecting live event bindings.
    #[must_use]
    pub const fn signals(&self) -> &SignalBinder {
        &self.signals
    }

    /// Reconciles the host graph under `container` with `element`.
    ///
    /// The root is reused when its key (node type and explicit id, `0` if absent) and
    /// its container match the previous pass. Otherwise a whole new tree is built and
    /// attached, and the previous root is detached and destroyed deferred.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::DuplicateKey`] if two siblings anywhere in `element`
    /// resolve to the same key, and [`ReconcileError::TypeMismatch`] if a retained
    /// node would be updated with properties of a different type. In both cases no
    /// host mutation is made and the retained tree is left untouched.
    pub fn render(&mut self, adapter: &mut A, container: NodeHandle, element: Element<A>) -> Result<()> {
        let key = Key::new(element.node_type, element.id.unwrap_or(0));
        let reused = self
            .mount
            .as_ref()
            .filter(|mount| mount.container == container && mount.root.key == key)
            .map(|mount| &mount.root);
        validate(reused, &element, key)?;
        let reuse = reused.is_some();

        self.churn.reset();
        let mut pass = Pass {
            adapter,
            signals: &mut self.signals,
            churn: &mut self.churn,
            config: &self.config,
            doomed: Vec::new(),
            moves: 0,
        };

        let root = match self.mount.take() {
            Some(previous) if reuse => pass.render_node(container, Some(previous.root), key, element),
            previous => {
                let root = pass.render_node(container, None, key, element);
                if let Some(previous) = previous {
                    debug!(old = %previous.root.key, new = %key, "replacing root");
                    pass.remove(previous.container, previous.root, true);
                }
                root
            }
        };
        let moves = pass.finish();

        self.mount = Some(Mount { container, root });
        let stats = self.churn.stats();
        debug!(
            root = %key,
            created = stats.created,
            destroyed = stats.destroyed,
            moves,
            "reconciled"
        );
        Ok(())
    }

    /// Detaches the retained tree and schedules its deferred destruction.
    ///
    /// Used when the owning UI scope goes away. Churn counters are reset and count the
    /// torn down nodes. Does nothing if nothing is mounted.
    pub fn teardown(&mut self, adapter: &mut A) {
        self.churn.reset();
        let Some(Mount { container, root }) = self.mount.take() else {
            return;
        };
        let key = root.key;
        let mut pass = Pass {
            adapter,
            signals: &mut self.signals,
            churn: &mut self.churn,
            config: &self.config,
            doomed: Vec::new(),
            moves: 0,
        };
        pass.remove(container, root, true);
        pass.finish();
        debug!(root = %key, destroyed = self.churn.stats().destroyed, "torn down");
    }

    /// Routes a host event to the callback bound for it.
    ///
    /// Hosts call this when an event connected through
    /// [`NodeAdapter::connect_event`] fires. Must not be called during a pass.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::UnboundCallback`] if the node has no live binding for
    /// `event`, which means the host kept delivering events for a node after it was
    /// destroyed, and [`ReconcileError::EventArgument`] if `arg` has the wrong type.
    pub fn dispatch<T: 'static>(&self, node: NodeHandle, event: EventName, arg: &T) -> Result<()> {
        self.signals.dispatch(node, event, arg)
    }
}

impl<A: ?Sized + 'static> fmt::Debug for Reconciler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reconciler")
            .field("config", &self.config)
            .field("container", &self.mount.as_ref().map(|mount| mount.container))
            .field("root", &self.mount.as_ref().map(|mount| &mount.root))
            .field("churn", &self.churn)
            .finish_non_exhaustive()
    }
}

/// Checks `element` and its descendants before any host mutation: sibling keys must
/// be unique, and every element matched to a retained one must carry the same node
/// and property types.
fn validate<A: ?Sized + 'static>(
    old: Option<&PopulatedElement<A>>,
    element: &Element<A>,
    key: Key,
) -> Result<()> {
    if let Some(old) = old {
        if old.node_type() != element.node_type {
            return Err(ReconcileError::TypeMismatch {
                key,
                old: old.node_type().name(),
                new: element.node_type.name(),
            });
        }
        let (old_props, old_name) = old.body.props_type();
        let (new_props, new_name) = element.body.props_type();
        if old_props != new_props {
            return Err(ReconcileError::TypeMismatch {
                key,
                old: old_name,
                new: new_name,
            });
        }
    }

    let mut ids = IdentityResolver::new();
    let mut seen: HashMap<Key, usize> = HashMap::with_capacity(element.children.len());
    let mut keys = Vec::with_capacity(element.children.len());
    for (position, child) in element.children.iter().enumerate() {
        let child_key = ids.resolve_key(child.node_type, child.id);
        if let Some(&first) = seen.get(&child_key) {
            return Err(ReconcileError::DuplicateKey {
                parent: key.to_string(),
                key: child_key,
                first: element.children[first].describe(first),
                second: child.describe(position),
            });
        }
        seen.insert(child_key, position);
        keys.push(child_key);
    }

    for (child, child_key) in element.children.iter().zip(keys) {
        validate(old.and_then(|old| old.child(&child_key)), child, child_key)?;
    }
    Ok(())
}

/// Mutable state of a single pass.
struct Pass<'a, A: ?Sized> {
    adapter: &'a mut A,
    signals: &'a mut SignalBinder,
    churn: &'a mut ChurnTracker,
    config: &'a ReconcilerConfig,
    doomed: Vec<(NodeHandle, bool)>,
    moves: usize,
}

impl<A: NodeAdapter + ?Sized + 'static> Pass<'_, A> {
    fn render_node(
        &mut self,
        parent: NodeHandle,
        old: Option<PopulatedElement<A>>,
        key: Key,
        element: Element<A>,
    ) -> PopulatedElement<A> {
        let Element { children, body, .. } = element;
        let mut ctx = RenderCtx::new(&mut *self.adapter, &mut *self.signals);
        let (mut populated, fresh) = match old {
            Some(mut populated) => {
                let updated = body.update(&mut ctx, populated.node, populated.props_any());
                debug_assert!(updated, "property types are validated before the pass");
                populated.body = body;
                (populated, false)
            }
            None => {
                let node = body.create(&mut ctx);
                self.churn.record_created();
                (PopulatedElement::new(key, node, body), true)
            }
        };

        let node = populated.node;
        let mut previous = mem::take(&mut populated.children);
        let previous_order = mem::take(&mut populated.order);
        populated.ids.reset();

        let mut order = Vec::with_capacity(children.len());
        for child in children {
            let child_key = populated.ids.resolve_key(child.node_type, child.id);
            let old_child = previous.remove(&child_key);
            let child = self.render_node(node, old_child, child_key, child);
            populated.children.insert(child_key, child);
            order.push(child_key);
        }

        if fresh {
            self.adapter.attach_child(parent, node);
            trace!(%parent, %node, %key, "attached node");
            if self.config.label_nodes {
                self.adapter.set_debug_label(node, &key.to_string());
            }
        } else {
            let deferred = self.config.destroy_mode.is_deferred();
            for removed in previous_order {
                if let Some(removed) = previous.remove(&removed) {
                    self.remove(node, removed, deferred);
                }
            }
            debug_assert!(previous.is_empty(), "every retained child has an order slot");

            // Settle the tail first; every slot past `index` is final by the time it is
            // visited, so a move never disturbs a placed sibling.
            for (index, child_key) in order.iter().enumerate().rev() {
                let child = populated.children[child_key].node;
                if self.adapter.child_index(node, child) != Some(index) {
                    self.adapter.move_child_to_index(node, child, index);
                    self.moves += 1;
                    trace!(%node, %child, index, "moved child");
                }
            }
        }

        populated.order = order;
        populated
    }

    /// Detaches a retained subtree, releases its bindings and queues its destruction.
    fn remove(&mut self, parent: NodeHandle, populated: PopulatedElement<A>, deferred: bool) {
        let node = populated.node;
        self.adapter.detach_child(parent, node);

        let mut count = 0;
        populated.for_each_node(&mut |node| {
            self.signals.release(node);
            count += 1;
        });
        self.churn.record_destroyed(count);
        self.doomed.push((node, deferred));
        trace!(%parent, %node, subtree = count, deferred, "queued destroy");
    }

    /// Runs the queued destructions and returns the number of moves made.
    fn finish(self) -> usize {
        for (node, deferred) in self.doomed {
            self.adapter.destroy_node(node, deferred);
        }
        self.moves
    }
}
