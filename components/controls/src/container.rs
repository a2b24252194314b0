//! Layout containers.
//!
//! Containers carry no content of their own; the host lays out their children.
//! [`BoxContainer`] stacks children along one axis, [`CenterContainer`] centers them.

use scenegraft_core::{Element, NodeHandle, NodeType, RenderCtx};

use crate::{Alignment, ControlHost, ControlProps, Widget, control_builders};

/// Main axis of a [`BoxContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Children are laid out left to right.
    Horizontal,
    /// Children are laid out top to bottom.
    #[default]
    Vertical,
}

/// A container stacking its children along one axis.
///
/// Horizontal and vertical boxes are distinct node types, so flipping the axis of a
/// box recreates it together with its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxContainer {
    /// Shared control properties.
    pub control: ControlProps,
    /// Stacking axis.
    pub axis: Axis,
    /// Packing of the children along the axis.
    pub alignment: Alignment,
}

impl BoxContainer {
    /// Creates an empty box stacking along `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }

    /// Sets how children are packed.
    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Node type of a box stacking along `axis`.
    #[must_use]
    pub const fn node_type(axis: Axis) -> NodeType {
        match axis {
            Axis::Horizontal => HBOX,
            Axis::Vertical => VBOX,
        }
    }

    fn create<H: ControlHost + ?Sized>(ctx: &mut RenderCtx<'_, H>, props: &Self) -> NodeHandle {
        let node = ctx.create_node(Self::node_type(props.axis));
        props.apply(ctx, node, None);
        node
    }

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

    fn apply<H: ControlHost + ?Sized>(
        &self,
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: Option<&Self>,
    ) {
        self.control.apply(ctx, node, old.map(|old| &old.control));
        if old.is_none_or(|old| old.alignment != self.alignment) {
            ctx.adapter().set_alignment(node, self.alignment);
        }
    }

    /// Wraps the properties into an element.
    #[must_use]
    pub fn into_element<H: ControlHost + ?Sized + 'static>(self) -> Element<H> {
        Element::new(
            Self::node_type(self.axis),
            self,
            Self::create::<H>,
            Self::update::<H>,
        )
    }
}

control_builders!(BoxContainer);

const HBOX: NodeType = NodeType::new("HBoxContainer");
const VBOX: NodeType = NodeType::new("VBoxContainer");

/// A container centering its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CenterContainer {
    /// Shared control properties.
    pub control: ControlProps,
}

impl CenterContainer {
    /// Creates an empty center container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

control_builders!(CenterContainer);

impl Widget for CenterContainer {
    const NODE_TYPE: NodeType = NodeType::new("CenterContainer");

    fn apply<H: ControlHost + ?Sized>(
        &self,
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: Option<&Self>,
    ) {
        self.control.apply(ctx, node, old.map(|old| &old.control));
    }
}

/// Creates a horizontal box holding `children`.
#[must_use]
pub fn hbox<H: ControlHost + ?Sized + 'static>(
    children: impl IntoIterator<Item = Element<H>>,
) -> Element<H> {
    BoxContainer::new(Axis::Horizontal)
        .into_element()
        .children(children)
}

/// Creates a vertical box holding `children`.
#[must_use]
pub fn vbox<H: ControlHost + ?Sized + 'static>(
    children: impl IntoIterator<Item = Element<H>>,
) -> Element<H> {
    BoxContainer::new(Axis::Vertical)
        .into_element()
        .children(children)
}

/// Creates a center container holding `children`.
#[must_use]
pub fn center<H: ControlHost + ?Sized + 'static>(
    children: impl IntoIterator<Item = Element<H>>,
) -> Element<H> {
    CenterContainer::new().into_element().children(children)
}
