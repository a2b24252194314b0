//! Per-pass counters of host nodes created and destroyed.

/// Node churn of a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChurnStats {
    /// Host nodes created by the pass.
    pub created: usize,
    /// Host nodes destroyed by the pass, counting every node of a removed subtree.
    pub destroyed: usize,
}

impl ChurnStats {
    /// Returns `true` when the pass neither created nor destroyed anything.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.created == 0 && self.destroyed == 0
    }
}

/// Collects [`ChurnStats`] when enabled; costs nothing otherwise.
#[derive(Debug, Clone, Default)]
pub struct ChurnTracker {
    enabled: bool,
    stats: ChurnStats,
}

impl ChurnTracker {
    /// Creates a tracker, collecting only if `enabled`.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stats: ChurnStats {
                created: 0,
                destroyed: 0,
            },
        }
    }

    /// Returns whether counters are being collected.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns collection on or off. Takes effect from the next pass.
    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Zeroes the counters at the start of a pass.
    pub const fn reset(&mut self) {
        self.stats = ChurnStats {
            created: 0,
            destroyed: 0,
        };
    }

    /// Records one created node.
    pub const fn record_created(&mut self) {
        if self.enabled {
            self.stats.created += 1;
        }
    }

    /// Records `count` destroyed nodes.
    pub const fn record_destroyed(&mut self, count: usize) {
        if self.enabled {
            self.stats.destroyed += count;
        }
    }

    /// Counters of the most recent pass.
    #[must_use]
    pub const fn stats(&self) -> ChurnStats {
        self.stats
    }
}
