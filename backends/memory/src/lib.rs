//! In-memory host scene graph.
//!
//! [`MemoryHost`] implements [`NodeAdapter`](scenegraft_core::NodeAdapter) and
//! [`ControlHost`](scenegraft_controls::ControlHost) on top of a plain arena, without
//! any windowing system. It keeps a journal of every request it receives, which makes
//! it the reference host for tests, and it can run a UI headless.
//!
//! ```
//! use scenegraft_controls::{label, vbox};
//! use scenegraft_core::Reconciler;
//! use scenegraft_memory::MemoryHost;
//!
//! let mut host = MemoryHost::new();
//! let mut reconciler = Reconciler::new();
//! let viewport = host.viewport();
//! reconciler.render(&mut host, viewport, vbox([label("hello")]))?;
//! host.flush();
//! assert_eq!(
//!     host.outline(viewport),
//!     "Viewport\n  VBoxContainer [VBoxContainer#0]\n    Label [Label#0] \"hello\"\n",
//! );
//! # Ok::<(), scenegraft_core::ReconcileError>(())
//! ```

pub mod host;
pub mod journal;
pub mod node;

pub use host::MemoryHost;
pub use journal::HostOp;
pub use node::{NodeRecord, Property};
