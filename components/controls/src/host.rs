//! Host capabilities the stock controls rely on.

use scenegraft_core::{NodeAdapter, NodeHandle};

/// Minimum extent of a control, in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// The empty size. Hosts treat it as "no minimum".
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// How a box container packs its children along its main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Children start at the leading edge.
    #[default]
    Begin,
    /// Children are centered.
    Center,
    /// Children end at the trailing edge.
    End,
}

/// A [`NodeAdapter`] that also exposes typed property setters for controls.
///
/// Setters are only called with nodes created through the same host, and only with
/// properties that make sense for the node type (text for labels, buttons and line
/// edits; alignment for box containers).
pub trait ControlHost: NodeAdapter {
    /// Sets the displayed or edited text.
    fn set_text(&mut self, node: NodeHandle, text: &str);

    /// Enables or disables user interaction.
    fn set_disabled(&mut self, node: NodeHandle, disabled: bool);

    /// Sets the minimum size reserved for the control.
    fn set_min_size(&mut self, node: NodeHandle, size: Size);

    /// Sets how a box container packs its children.
    fn set_alignment(&mut self, node: NodeHandle, alignment: Alignment);
}
