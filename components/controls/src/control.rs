//! The base control and the properties every control shares.

use scenegraft_core::{Callback, NodeHandle, NodeType, RenderCtx};

use crate::{ControlHost, Size, Widget, control_builders, events};

/// Properties shared by every control.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControlProps {
    /// Minimum size reserved by the host.
    pub min_size: Size,
    /// Fired once when the node enters the host tree.
    pub on_ready: Option<Callback>,
}

impl ControlProps {
    /// Copies the shared properties onto `node`.
    pub fn apply<H: ControlHost + ?Sized>(
        &self,
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: Option<&Self>,
    ) {
        if old.is_none_or(|old| old.min_size != self.min_size) {
            ctx.adapter().set_min_size(node, self.min_size);
        }
        ctx.bind(node, events::READY, self.on_ready.as_ref());
    }
}

/// A bare control, typically used as a spacer or an anchor for custom drawing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Control {
    /// Shared control properties.
    pub control: ControlProps,
}

impl Control {
    /// Creates a control with default properties.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

control_builders!(Control);

impl Widget for Control {
    const NODE_TYPE: NodeType = NodeType::new("Control");

    fn apply<H: ControlHost + ?Sized>(
        &self,
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: Option<&Self>,
    ) {
        self.control.apply(ctx, node, old.map(|old| &old.control));
    }
}

/// Creates a bare control element.
#[must_use]
pub fn control<H: ControlHost + ?Sized + 'static>() -> scenegraft_core::Element<H> {
    Control::new().into_element()
}
