//! # scenegraft-core
//!
//! The reconciliation engine behind scenegraft.
//!
//! Callers describe the UI they want as a tree of [`Element`]s, once per tick. A
//! [`Reconciler`] diffs that tree against the one it retained from the previous tick
//! and issues the smallest set of create, update, move and destroy requests against
//! a host node graph reached through [`NodeAdapter`].
//!
//! - [`element`] — immutable per-pass descriptions and their factories.
//! - [`identity`] — sibling keys and the resolver that assigns them.
//! - [`reconciler`] — the diff/patch walk.
//! - [`signal`] — event callbacks and the binder that avoids reconnecting unchanged ones.
//! - [`churn`] — optional created/destroyed counters.
//!
//! ```ignore
//! let mut reconciler = Reconciler::new();
//! loop {
//!     let tree = vbox([label("Hello"), button("Quit", Callback::from_fn(quit))]);
//!     reconciler.render(&mut host, container, tree)?;
//!     host.flush();
//! }
//! ```

pub mod adapter;
pub mod churn;
pub mod config;
pub mod element;
mod error;
pub mod identity;
pub mod populated;
pub mod reconciler;
pub mod signal;

#[cfg(test)]
mod tests;

pub use adapter::{NodeAdapter, NodeHandle, RenderCtx};
pub use churn::{ChurnStats, ChurnTracker};
pub use config::{DestroyMode, ReconcilerConfig};
pub use element::{CreateFn, Element, NodeType, UpdateFn};
pub use error::{ReconcileError, Result};
pub use identity::{IdentityResolver, Key};
pub use populated::PopulatedElement;
pub use reconciler::Reconciler;
pub use signal::{AnyCallback, BindOutcome, Callback, CallbackFn, EventName, SignalBinder};
