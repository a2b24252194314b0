//! Reconciler configuration.

/// How nodes removed from a reused parent are destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DestroyMode {
    /// Ask the host to destroy the node once it is safe, after the current dispatch.
    #[default]
    Deferred,
    /// Ask the host to destroy the node right away, at the end of the pass.
    Immediate,
}

impl DestroyMode {
    /// Returns `true` for [`DestroyMode::Deferred`].
    #[must_use]
    pub const fn is_deferred(self) -> bool {
        matches!(self, Self::Deferred)
    }
}

/// Tunables of a [`Reconciler`](crate::Reconciler).
///
/// Root replacement and teardown always destroy deferred, whatever
/// [`destroy_mode`](Self::destroy_mode) says: host callbacks may still be running on
/// the old root when it is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReconcilerConfig {
    /// Collect created/destroyed counters every pass.
    pub collect_churn: bool,
    /// Destruction strategy for removed children.
    pub destroy_mode: DestroyMode,
    /// Label freshly attached nodes with `"<node-type>#<id>"`.
    pub label_nodes: bool,
    /// Warn once per call site about callbacks built from closures.
    pub warn_unstable_callbacks: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            collect_churn: false,
            destroy_mode: DestroyMode::Deferred,
            label_nodes: true,
            warn_unstable_callbacks: cfg!(debug_assertions),
        }
    }
}

impl ReconcilerConfig {
    /// Sets [`collect_churn`](Self::collect_churn).
    #[must_use]
    pub const fn with_collect_churn(mut self, enabled: bool) -> Self {
        self.collect_churn = enabled;
        self
    }

    /// Sets [`destroy_mode`](Self::destroy_mode).
    #[must_use]
    pub const fn with_destroy_mode(mut self, mode: DestroyMode) -> Self {
        self.destroy_mode = mode;
        self
    }

    /// Sets [`label_nodes`](Self::label_nodes).
    #[must_use]
    pub const fn with_label_nodes(mut self, enabled: bool) -> Self {
        self.label_nodes = enabled;
        self
    }

    /// Sets [`warn_unstable_callbacks`](Self::warn_unstable_callbacks).
    #[must_use]
    pub const fn with_warn_unstable_callbacks(mut self, enabled: bool) -> Self {
        self.warn_unstable_callbacks = enabled;
        self
    }
}
