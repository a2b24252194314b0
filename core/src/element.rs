//! Immutable per-pass element descriptions.
//!
//! An [`Element`] describes one host node: its [`NodeType`], an optional explicit id,
//! its children and its properties. Elements are cheap values built fresh for every
//! pass and consumed by [`Reconciler::render`](crate::Reconciler::render).
//!
//! Properties are stored type-erased next to two plain functions: a factory that
//! creates and fully initializes a host node from them, and an update function that
//! brings an existing node from the old properties to the new ones.
//!
//! ```ignore
//! fn label(text: &str) -> Element<MyHost> {
//!     Element::new(LABEL, LabelProps { text: text.into() }, create_label, update_label)
//! }
//!
//! let tree = Element::new(PANEL, (), create_panel, update_panel)
//!     .child(label("a"))
//!     .child(label("b").id(7));
//! ```

use core::{
    any::{Any, TypeId, type_name},
    fmt,
};

use crate::{NodeHandle, RenderCtx};

/// Identifies a kind of host node, such as `"Button"`.
///
/// Node types qualify sibling keys: children of different types never share an
/// identity, even with equal ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeType(&'static str);

impl NodeType {
    /// Creates a node type from its name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the node type's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Creates a host node from properties.
pub type CreateFn<A, P> = fn(&mut RenderCtx<'_, A>, &P) -> NodeHandle;

/// Updates a host node from old properties to new ones.
pub type UpdateFn<A, P> = fn(&mut RenderCtx<'_, A>, NodeHandle, &P, &P);

/// Properties, factory and update function of one element, with the property
/// type erased.
pub(crate) trait ElementBody<A: ?Sized> {
    fn create(&self, ctx: &mut RenderCtx<'_, A>) -> NodeHandle;

    /// Returns `false`, without touching the node, if `old` is not this body's
    /// property type.
    fn update(&self, ctx: &mut RenderCtx<'_, A>, node: NodeHandle, old: &dyn Any) -> bool;

    fn props(&self) -> &dyn Any;

    fn props_type(&self) -> (TypeId, &'static str);

    fn fmt_props(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

struct Typed<A: ?Sized, P> {
    props: P,
    create: CreateFn<A, P>,
    update: UpdateFn<A, P>,
}

impl<A, P> ElementBody<A> for Typed<A, P>
where
    A: ?Sized,
    P: fmt::Debug + 'static,
{
    fn create(&self, ctx: &mut RenderCtx<'_, A>) -> NodeHandle {
        (self.create)(ctx, &self.props)
    }

    fn update(&self, ctx: &mut RenderCtx<'_, A>, node: NodeHandle, old: &dyn Any) -> bool {
        old.downcast_ref::<P>().is_some_and(|old| {
            (self.update)(ctx, node, old, &self.props);
            true
        })
    }

    fn props(&self) -> &dyn Any {
        &self.props
    }

    fn props_type(&self) -> (TypeId, &'static str) {
        (TypeId::of::<P>(), type_name::<P>())
    }

    fn fmt_props(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.props, f)
    }
}

/// Description of a host node and its children for one pass.
pub struct Element<A: ?Sized + 'static> {
    pub(crate) node_type: NodeType,
    pub(crate) id: Option<i64>,
    pub(crate) children: Vec<Self>,
    pub(crate) body: Box<dyn ElementBody<A>>,
}

impl<A: ?Sized + 'static> Element<A> {
    /// Creates an element without children.
    ///
    /// `create` must return a node that is fully initialized from `props` but not yet
    /// attached; the reconciler attaches it. `update` is called on every later pass
    /// that keeps the node, with the previous and the current properties, and is
    /// expected to skip work when they are equal.
    pub fn new<P>(
        node_type: NodeType,
        props: P,
        create: CreateFn<A, P>,
        update: UpdateFn<A, P>,
    ) -> Self
    where
        P: fmt::Debug + 'static,
    {
        Self {
            node_type,
            id: None,
            children: Vec::new(),
            body: Box::new(Typed {
                props,
                create,
                update,
            }),
        }
    }

    /// Gives the element an explicit id, keeping its identity stable when siblings
    /// are inserted, removed or reordered around it.
    #[must_use]
    pub const fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets or clears the explicit id.
    #[must_use]
    pub const fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends every child yielded by `children`.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns the node type.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the explicit id, if one was given.
    #[must_use]
    pub const fn explicit_id(&self) -> Option<i64> {
        self.id
    }

    /// Returns the children in declared order.
    #[must_use]
    pub fn child_elements(&self) -> &[Self] {
        &self.children
    }

    /// Returns the properties if they are of type `P`.
    #[must_use]
    pub fn props<P: 'static>(&self) -> Option<&P> {
        self.body.props().downcast_ref()
    }

    /// Describes the element for diagnostics, e.g. `Button (id 3) at position 1`.
    pub(crate) fn describe(&self, position: usize) -> String {
        match self.id {
            Some(id) => format!("{} (id {id}) at position {position}", self.node_type),
            None => format!("{} (auto) at position {position}", self.node_type),
        }
    }
}

impl<A: ?Sized + 'static> fmt::Debug for Element<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Props<'a, A: ?Sized>(&'a dyn ElementBody<A>);

        impl<A: ?Sized> fmt::Debug for Props<'_, A> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt_props(f)
            }
        }

        f.debug_struct("Element")
            .field("node_type", &self.node_type)
            .field("id", &self.id)
            .field("props", &Props(self.body.as_ref()))
            .field("children", &self.children)
            .finish()
    }
}
