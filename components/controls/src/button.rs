//! Push buttons.

use alloc::string::String;

use scenegraft_core::{Callback, Element, NodeHandle, NodeType, RenderCtx};

use crate::{ControlHost, ControlProps, Widget, control_builders, events};

/// A push button with a text caption.
///
/// ```ignore
/// button("Delete", Callback::new(delete_row, row.id))
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Button {
    /// Shared control properties.
    pub control: ControlProps,
    /// The caption.
    pub text: String,
    /// Whether the button ignores input.
    pub disabled: bool,
    /// Fired when the button is activated.
    pub on_pressed: Option<Callback>,
}

impl Button {
    /// Creates an enabled button with the given caption and no action.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the callback fired on activation.
    #[must_use]
    pub fn on_pressed(mut self, callback: Callback) -> Self {
        self.on_pressed = Some(callback);
        self
    }

    /// Disables or enables the button.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

control_builders!(Button);

impl Widget for Button {
    const NODE_TYPE: NodeType = NodeType::new("Button");

    fn apply<H: ControlHost + ?Sized>(
        &self,
        ctx: &mut RenderCtx<'_, H>,
        node: NodeHandle,
        old: Option<&Self>,
    ) {
        self.control.apply(ctx, node, old.map(|old| &old.control));
        if old.is_none_or(|old| old.disabled != self.disabled) {
            ctx.adapter().set_disabled(node, self.disabled);
        }
        if old.is_none_or(|old| old.text != self.text) {
            ctx.adapter().set_text(node, &self.text);
        }
        ctx.bind(node, events::PRESSED, self.on_pressed.as_ref());
    }
}

/// Creates a button element that fires `on_pressed` when activated.
#[must_use]
pub fn button<H: ControlHost + ?Sized + 'static>(
    text: impl Into<String>,
    on_pressed: Callback,
) -> Element<H> {
    Button::new(text).on_pressed(on_pressed).into_element()
}
