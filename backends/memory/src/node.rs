//! Node records stored in the arena.

use core::fmt;
use std::collections::BTreeMap;

use scenegraft_controls::{Alignment, Size};
use scenegraft_core::{EventName, NodeHandle, NodeType};

/// A typed property value set through [`ControlHost`](scenegraft_controls::ControlHost).
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// Displayed or edited text.
    Text(String),
    /// Whether input is ignored.
    Disabled(bool),
    /// Reserved minimum size.
    MinSize(Size),
    /// Packing of a box container.
    Alignment(Alignment),
}

impl Property {
    /// Name under which the property is stored in a node's property bag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Disabled(_) => "disabled",
            Self::MinSize(_) => "min_size",
            Self::Alignment(_) => "alignment",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "text={text:?}"),
            Self::Disabled(disabled) => write!(f, "disabled={disabled}"),
            Self::MinSize(size) => write!(f, "min_size={}x{}", size.width, size.height),
            Self::Alignment(alignment) => write!(f, "alignment={alignment:?}"),
        }
    }
}

/// A live node of the host graph.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub(crate) node_type: NodeType,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
    pub(crate) label: Option<String>,
    pub(crate) properties: BTreeMap<&'static str, Property>,
    pub(crate) events: Vec<EventName>,
}

impl NodeRecord {
    pub(crate) const fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            label: None,
            properties: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Returns the node type.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the parent, if the node is attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns the children in sibling order.
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the debug label, if one was set.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the property stored under `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Iterates over all properties, sorted by name.
    pub fn properties(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties.values()
    }

    /// Returns the text property.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self.properties.get("text") {
            Some(Property::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` if the node is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        matches!(self.properties.get("disabled"), Some(Property::Disabled(true)))
    }

    /// Returns the events currently connected on the node.
    #[must_use]
    pub fn events(&self) -> &[EventName] {
        &self.events
    }

    /// Returns `true` if `event` is connected.
    #[must_use]
    pub fn is_connected(&self, event: EventName) -> bool {
        self.events.contains(&event)
    }
}
