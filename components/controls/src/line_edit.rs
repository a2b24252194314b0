//! Single-line text input.
//!
//! The host owns the edited text while the user types. The element only pushes text
//! to the node when its `text` property changed since the last pass, so keystrokes
//! that the caller has not yet echoed back are never overwritten.

use alloc::string::String;

use scenegraft_core::{Callback, Element, NodeHandle, NodeType, RenderCtx};

use crate::{ControlHost, ControlProps, Widget, control_builders, events};

/// A single-line text input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineEdit {
    /// Shared control properties.
    pub control: ControlProps,
    /// The text the field shows.
    pub text: String,
    /// Fired on every edit with the new text.
    pub on_text_changed: Option<Callback<String>>,
    /// Fired when the user confirms the input.
    pub on_text_entered: Option<Callback<String>>,
}

impl LineEdit {
    /// Creates a line edit showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the callback fired on every edit.
    #[must_use]
    pub fn on_text_changed(mut self, callback: Callback<String>) -> Self {
        self.on_text_changed = Some(callback);
        self
    }

    /// Sets the callback fired when the input is confirmed.
    #[must_use]
    pub fn on_text_entered(mut self, callback: Callback<String>) -> Self {
        self.on_text_entered = Some(callback);
        self
    }
}

control_builders!(LineEdit);

impl Widget for LineEdit {
    const NODE_TYPE: NodeType = NodeType::new("LineEdit");

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
        ctx.bind(node, events::TEXT_CHANGED, self.on_text_changed.as_ref());
        ctx.bind(node, events::TEXT_ENTERED, self.on_text_entered.as_ref());
    }
}

/// Creates a line edit element reporting edits to `on_text_changed`.
#[must_use]
pub fn line_edit<H: ControlHost + ?Sized + 'static>(
    text: impl Into<String>,
    on_text_changed: Callback<String>,
) -> Element<H> {
    LineEdit::new(text)
        .on_text_changed(on_text_changed)
        .into_element()
}
