//! Static text.

use alloc::string::String;

use scenegraft_core::{Element, NodeHandle, NodeType, RenderCtx};

use crate::{ControlHost, ControlProps, Widget, control_builders};

/// A control displaying a line of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Label {
    /// Shared control properties.
    pub control: ControlProps,
    /// The displayed text.
    pub text: String,
}

impl Label {
    /// Creates a label showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            control: ControlProps::default(),
            text: text.into(),
        }
    }
}

control_builders!(Label);

impl Widget for Label {
    const NODE_TYPE: NodeType = NodeType::new("Label");

    fn apply<H: ControlHost + ?Sized>(
        &self,
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: Option<&Self>,
    ) {
        self.control.apply(ctx, node, old.map(|old| &old.control));
        if old.is_none_or(|old| old.text != self.text) {
            ctx.adapter().set_text(node, &self.text);
        }
    }
}

/// Creates a label element showing `text`.
#[must_use]
pub fn label<H: ControlHost + ?Sized + 'static>(text: impl Into<String>) -> Element<H> {
    Label::new(text).into_element()
}
