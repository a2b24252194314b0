//! `scenegraft` Controls
//!
//! Stock elements for hosts that expose a classic control toolkit: plain controls,
//! labels, buttons, single-line edits and box containers.
//!
//! Every control is a property struct implementing [`Widget`]. The trait supplies the
//! factory and update function the reconciler needs, so a control only describes how
//! its properties are copied onto a node. Updates with equal old and new properties
//! are skipped entirely.
//!
//! ```
//! use scenegraft_controls::{LineEdit, Widget, button, label, vbox};
//! use scenegraft_core::{Callback, NodeHandle, Reconciler};
//! use scenegraft_memory::MemoryHost;
//!
//! fn set_name(_node: NodeHandle, _id: &u32, _name: &String) {}
//! fn save(_node: NodeHandle, _id: &u32, _arg: &()) {}
//!
//! let mut host = MemoryHost::new();
//! let mut reconciler = Reconciler::new();
//! let viewport = host.viewport();
//! let tree = vbox([
//!     label("Name"),
//!     LineEdit::new("Ada")
//!         .on_text_changed(Callback::new(set_name, 7))
//!         .into_element(),
//!     button("Save", Callback::new(save, 7)).id(1),
//! ]);
//! reconciler.render(&mut host, viewport, tree)?;
//!
//! let root = reconciler.root_node().expect("mounted");
//! assert_eq!(host.children(root).len(), 3);
//! # Ok::<(), scenegraft_core::ReconcileError>(())
//! ```

#![no_std]
extern crate alloc;

pub mod button;
pub mod container;
pub mod control;
pub mod host;
pub mod label;
pub mod line_edit;

pub use button::{Button, button};
pub use container::{Axis, BoxContainer, CenterContainer, center, hbox, vbox};
pub use control::{Control, ControlProps, control};
pub use host::{Alignment, ControlHost, Size};
pub use label::{Label, label};
pub use line_edit::{LineEdit, line_edit};

use core::fmt::Debug;

use scenegraft_core::{Element, NodeHandle, NodeType, RenderCtx};

/// Host event names connected by the stock controls.
pub mod events {
    use scenegraft_core::EventName;

    /// Emitted once when a control enters the host tree.
    pub const READY: EventName = "ready";
    /// Emitted when a button is activated.
    pub const PRESSED: EventName = "pressed";
    /// Emitted on every edit of a line edit, with the new text.
    pub const TEXT_CHANGED: EventName = "text_changed";
    /// Emitted when the user confirms a line edit, with its text.
    pub const TEXT_ENTERED: EventName = "text_entered";
}

/// Properties of a control that know how to copy themselves onto a host node.
pub trait Widget: Debug + PartialEq + Sized + 'static {
    /// Node type created for this control.
    const NODE_TYPE: NodeType;

    /// Copies the properties onto `node`.
    ///
    /// `old` is `None` for a freshly created node, in which case every property must
    /// be applied. Otherwise only properties that differ from `old` need touching.
    fn apply<H: ControlHost + ?Sized>(
        &self,
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: Option<&Self>,
    );

    /// Creates a node and initializes it from `props`.
    fn create<H: ControlHost + ?Sized>(ctx: &mut RenderCtx<'_, H>, props: &Self) -> NodeHandle {
        let node = ctx.create_node(Self::NODE_TYPE);
        props.apply(ctx, node, None);
        node
    }

    /// Brings `node` from `old` to `new`, doing nothing if they are equal.
    fn update<H: ControlHost + ?Sized>(
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: &Self,
        new: &Self,
    ) {
        if old != new {
            new.apply(ctx, node, Some(old));
        }
    }

    /// Wraps the properties into an element.
    #[must_use]
    fn into_element<H: ControlHost + ?Sized + 'static>(self) -> Element<H> {
        Element::new(Self::NODE_TYPE, self, Self::create::<H>, Self::update::<H>)
    }
}

/// Adds the builder methods shared by every control to a props struct with a
/// `control: ControlProps` field, and converts it into an [`Element`].
macro_rules! control_builders {
    ($ty:ident) => {
        impl $ty {
            /// Sets the minimum size the host must reserve for the control.
            #[must_use]
            pub const fn min_size(mut self, size: $crate::Size) -> Self {
                self.control.min_size = size;
                self
            }

            /// Sets the callback fired when the control enters the host tree.
            #[must_use]
            pub fn on_ready(mut self, callback: ::scenegraft_core::Callback) -> Self {
                self.control.on_ready = Some(callback);
                self
            }
        }

        impl<H: $crate::ControlHost + ?Sized + 'static> From<$ty> for ::scenegraft_core::Element<H> {
            fn from(props: $ty) -> Self {
                props.into_element()
            }
        }
    };
}

pub(crate) use control_builders;
