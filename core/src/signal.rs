//! Event callbacks and the binder that keeps host connections in sync with them.
//!
//! Event properties do not hold arbitrary closures. They hold a [`Callback`]: a plain
//! function pointer plus a context value, both compared structurally. Two callbacks
//! built from the same function and equal contexts are the same logical callback, so
//! re-rendering an element every frame does not churn its host connections.
//!
//! The [`SignalBinder`] remembers, per node and event name, the callback currently
//! connected on the host. [`SignalBinder::bind`] compares the new logical value with
//! that record and only disconnects/connects when they differ.
//!
//! [`Callback::from_closure`] exists for the cases where a capturing closure is
//! unavoidable. Such callbacks never compare equal to a freshly built one, so they
//! reconnect on every pass; the binder reports each offending call site once.

use core::{
    any::{Any, type_name},
    fmt,
    panic::Location,
    ptr,
};
use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use tracing::{trace, warn};

use crate::{NodeAdapter, NodeHandle, ReconcileError, Result};

/// Name of a host event, such as `"pressed"`.
pub type EventName = &'static str;

/// Stable function shape accepted by [`Callback::new`].
pub type CallbackFn<C, T> = fn(NodeHandle, &C, &T);

trait CallbackImpl<T>: 'static {
    fn call(&self, node: NodeHandle, arg: &T);
    fn same_as(&self, other: &dyn CallbackImpl<T>) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn closure_site(&self) -> Option<&'static Location<'static>>;
}

struct FnCallback<C, T> {
    func: CallbackFn<C, T>,
    context: C,
}

impl<C, T> CallbackImpl<T> for FnCallback<C, T>
where
    C: PartialEq + 'static,
    T: 'static,
{
    fn call(&self, node: NodeHandle, arg: &T) {
        (self.func)(node, &self.context, arg);
    }

    fn same_as(&self, other: &dyn CallbackImpl<T>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| {
                ptr::fn_addr_eq(self.func, other.func) && self.context == other.context
            })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn closure_site(&self) -> Option<&'static Location<'static>> {
        None
    }
}

struct ClosureCallback<T> {
    f: Box<dyn Fn(NodeHandle, &T)>,
    site: &'static Location<'static>,
}

impl<T: 'static> CallbackImpl<T> for ClosureCallback<T> {
    fn call(&self, node: NodeHandle, arg: &T) {
        (self.f)(node, arg);
    }

    fn same_as(&self, other: &dyn CallbackImpl<T>) -> bool {
        ptr::addr_eq(ptr::from_ref(self), ptr::from_ref(other))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn closure_site(&self) -> Option<&'static Location<'static>> {
        Some(self.site)
    }
}

fn noop<T>(_node: NodeHandle, _context: &(), _arg: &T) {}

/// A logical event callback: a function pointer plus a comparable context.
///
/// `T` is the argument the host passes along with the event, `()` for events
/// without a payload.
pub struct Callback<T: 'static = ()> {
    inner: Rc<dyn CallbackImpl<T>>,
}

impl<T: 'static> Callback<T> {
    /// Creates a callback from a stable function and the context it needs.
    ///
    /// Anything the function would otherwise capture belongs in `context`.
    pub fn new<C>(func: CallbackFn<C, T>, context: C) -> Self
    where
        C: PartialEq + 'static,
    {
        Self {
            inner: Rc::new(FnCallback { func, context }),
        }
    }

    /// Creates a callback from a function that needs no context.
    pub fn from_fn(func: CallbackFn<(), T>) -> Self {
        Self::new(func, ())
    }

    /// Creates a callback that does nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self::from_fn(noop::<T>)
    }

    /// Creates a callback from a capturing closure.
    ///
    /// The result only equals its own clones, so a closure rebuilt every pass
    /// reconnects every pass. The binder warns once per call site when this happens.
    #[track_caller]
    pub fn from_closure(f: impl Fn(NodeHandle, &T) + 'static) -> Self {
        Self {
            inner: Rc::new(ClosureCallback {
                f: Box::new(f),
                site: Location::caller(),
            }),
        }
    }

    /// Invokes the callback for `node`.
    pub fn invoke(&self, node: NodeHandle, arg: &T) {
        self.inner.call(node, arg);
    }

    /// Returns `true` for callbacks built from a function pointer and context.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.inner.closure_site().is_none()
    }
}

impl<T: 'static> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> PartialEq for Callback<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.same_as(other.inner.as_ref())
    }
}

impl<T: 'static> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.closure_site() {
            Some(site) => write!(f, "Callback<{}>(closure at {site})", type_name::<T>()),
            None => write!(f, "Callback<{}>", type_name::<T>()),
        }
    }
}

trait ErasedCallback {
    fn call_any(&self, node: NodeHandle, arg: &dyn Any) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn arg_type(&self) -> &'static str;
    fn closure_site(&self) -> Option<&'static Location<'static>>;
}

struct Erased<T: 'static>(Callback<T>);

impl<T: 'static> ErasedCallback for Erased<T> {
    fn call_any(&self, node: NodeHandle, arg: &dyn Any) -> bool {
        arg.downcast_ref::<T>().is_some_and(|arg| {
            self.0.invoke(node, arg);
            true
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn arg_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn closure_site(&self) -> Option<&'static Location<'static>> {
        self.0.inner.closure_site()
    }
}

/// A [`Callback`] with its argument type erased, as stored by the binder and
/// handed to [`NodeAdapter::connect_event`].
#[derive(Clone)]
pub struct AnyCallback {
    inner: Rc<dyn ErasedCallback>,
}

impl AnyCallback {
    /// Erases the argument type of `callback`.
    #[must_use]
    pub fn new<T: 'static>(callback: Callback<T>) -> Self {
        Self {
            inner: Rc::new(Erased(callback)),
        }
    }

    /// Returns `true` when this is the same logical callback as `callback`.
    #[must_use]
    pub fn matches<T: 'static>(&self, callback: &Callback<T>) -> bool {
        self.inner
            .as_any()
            .downcast_ref::<Erased<T>>()
            .is_some_and(|erased| erased.0 == *callback)
    }

    /// Invokes the callback, returning `false` if `arg` has the wrong type.
    pub fn invoke(&self, node: NodeHandle, arg: &dyn Any) -> bool {
        self.inner.call_any(node, arg)
    }

    /// Name of the argument type the callback accepts.
    #[must_use]
    pub fn arg_type(&self) -> &'static str {
        self.inner.arg_type()
    }

    /// Returns `true` if both values share the same allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: 'static> From<Callback<T>> for AnyCallback {
    fn from(callback: Callback<T>) -> Self {
        Self::new(callback)
    }
}

impl fmt::Debug for AnyCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyCallback<{}>", self.arg_type())
    }
}

/// What [`SignalBinder::bind`] did to the host connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The connection already matched; the host was not touched.
    Unchanged,
    /// A connection was made where there was none.
    Connected,
    /// The previous connection was replaced by a new one.
    Rebound,
    /// The previous connection was removed.
    Disconnected,
}

/// Keeps at most one host connection per (node, event name).
#[derive(Debug, Default)]
pub struct SignalBinder {
    records: HashMap<NodeHandle, HashMap<EventName, AnyCallback>>,
    warn_unstable: bool,
    warned_sites: HashSet<&'static Location<'static>>,
}

impl SignalBinder {
    /// Creates an empty binder.
    #[must_use]
    pub fn new(warn_unstable: bool) -> Self {
        Self {
            warn_unstable,
            ..Self::default()
        }
    }

    /// Enables or disables the unstable-callback diagnostic.
    pub const fn set_warn_unstable(&mut self, enabled: bool) {
        self.warn_unstable = enabled;
    }

    /// Brings the connection for `event` on `node` in line with `callback`.
    ///
    /// - `None` with a live connection disconnects it.
    /// - A callback equal to the live one leaves the host untouched.
    /// - Any other callback replaces the live connection, if any.
    pub fn bind<A, T>(
        &mut self,
        adapter: &mut A,
        node: NodeHandle,
        event: EventName,
        callback: Option<&Callback<T>>,
    ) -> BindOutcome
    where
        A: NodeAdapter + ?Sized,
        T: 'static,
    {
        let Some(callback) = callback else {
            return self.unbind(adapter, node, event);
        };

        let events = self.records.entry(node).or_default();
        if events.get(event).is_some_and(|bound| bound.matches(callback)) {
            return BindOutcome::Unchanged;
        }

        let fresh = AnyCallback::new(callback.clone());
        let outcome = match events.insert(event, fresh.clone()) {
            Some(previous) => {
                adapter.disconnect_event(node, event, &previous);
                BindOutcome::Rebound
            }
            None => BindOutcome::Connected,
        };
        adapter.connect_event(node, event, &fresh);
        trace!(%node, event, ?outcome, "bound event");

        if let Some(site) = fresh.inner.closure_site() {
            self.report_unstable(site, event);
        }
        outcome
    }

    fn unbind<A: NodeAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        node: NodeHandle,
        event: EventName,
    ) -> BindOutcome {
        let Some(events) = self.records.get_mut(&node) else {
            return BindOutcome::Unchanged;
        };
        let Some(previous) = events.remove(event) else {
            return BindOutcome::Unchanged;
        };
        if events.is_empty() {
            self.records.remove(&node);
        }
        adapter.disconnect_event(node, event, &previous);
        trace!(%node, event, "unbound event");
        BindOutcome::Disconnected
    }

    fn report_unstable(&mut self, site: &'static Location<'static>, event: EventName) {
        if self.warn_unstable && self.warned_sites.insert(site) {
            warn!(
                event,
                %site,
                "callback built from a closure never compares equal across passes and is \
                 reconnected every time it is rendered; use Callback::new with a plain fn \
                 and pass captured state as its context instead"
            );
        }
    }

    /// Forgets every binding of `node`, returning how many there were.
    ///
    /// Called when the node is destroyed; the host drops the connections with it.
    pub fn release(&mut self, node: NodeHandle) -> usize {
        self.records.remove(&node).map_or(0, |events| events.len())
    }

    /// Returns the callback currently bound to `event` on `node`.
    #[must_use]
    pub fn bound(&self, node: NodeHandle, event: EventName) -> Option<&AnyCallback> {
        self.records.get(&node)?.get(event)
    }

    /// Returns `true` if any event of `node` is bound.
    #[must_use]
    pub fn is_bound(&self, node: NodeHandle) -> bool {
        self.records.contains_key(&node)
    }

    /// Routes a host event to the callback bound for it.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::UnboundCallback`] if nothing is bound to `event` on
    /// `node` (typically because the node was already released), and
    /// [`ReconcileError::EventArgument`] if `arg` is not the bound callback's
    /// argument type.
    pub fn dispatch(&self, node: NodeHandle, event: EventName, arg: &dyn Any) -> Result<()> {
        let callback = self
            .bound(node, event)
            .ok_or(ReconcileError::UnboundCallback { node, event })?;
        if callback.invoke(node, arg) {
            Ok(())
        } else {
            Err(ReconcileError::EventArgument {
                node,
                event,
                expected: callback.arg_type(),
            })
        }
    }
}
