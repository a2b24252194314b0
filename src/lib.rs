#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod logging;

#[doc(inline)]
pub use scenegraft_core::*;

/// Stock control elements.
pub use scenegraft_controls as controls;

/// The in-memory host.
pub use scenegraft_memory as memory;

pub mod prelude {
    //! A collection of commonly used types for easy importing.
    //!
    //! ```rust,ignore
    //! use scenegraft::prelude::*;
    //!
    //! fn view<H: ControlHost + 'static>(count: i64) -> Element<H> {
    //!     vbox([label(format!("{count}")), button("+1", Callback::new(add, 1))])
    //! }
    //! ```

    pub use scenegraft_controls::{
        Alignment, ControlHost, Size, Widget, button, center, control, hbox, label, line_edit,
        vbox,
    };
    pub use scenegraft_core::{
        Callback, DestroyMode, Element, NodeAdapter, NodeHandle, NodeType, ReconcileError,
        Reconciler, ReconcilerConfig, RenderCtx,
    };
    pub use scenegraft_memory::MemoryHost;
}
