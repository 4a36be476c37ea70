//! Memory lifecycle maintenance: decay, consolidation, archival.
//!
//! A maintenance pass walks every store once, computes each item's effective
//! score (`importance * exp(-k * hours_idle)`), and applies the first
//! matching transition:
//!
//! 1. effective score below the archive threshold → item moves to the
//!    archive and leaves its store (terminal);
//! 2. access count above the consolidation threshold → item is marked
//!    consolidated in place with a fixed-rate importance bump;
//! 3. otherwise the item stays active, untouched.
//!
//! Passes are non-reentrant: an overlapping call is rejected rather than run
//! concurrently.

use crate::error::{Error, Result};
use crate::item::{now_secs, MemoryItem};
use crate::store::MemoryStore;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

const SECONDS_PER_HOUR: f32 = 3600.0;

/// Decay and transition thresholds for maintenance passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Exponential decay constant (per idle hour).
    pub decay_rate: f32,
    /// Items with effective score below this are archived. In `[0, 1]`.
    pub archive_threshold: f32,
    /// Items read more than this many times are consolidated.
    pub consolidate_threshold: u64,
    /// Importance bump applied on consolidation, clamped at 1.0. In `[0, 1]`.
    pub consolidation_bump: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            decay_rate: 0.1,
            archive_threshold: 0.2,
            consolidate_threshold: 5,
            consolidation_bump: 0.1,
        }
    }
}

impl LifecycleConfig {
    /// Creates a lifecycle configuration with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the decay rate is negative or non-finite, or if
    /// the archive threshold leaves `[0, 1]`.
    pub fn new(
        decay_rate: f32,
        archive_threshold: f32,
        consolidate_threshold: u64,
    ) -> Result<Self> {
        let config = Self {
            decay_rate,
            archive_threshold,
            consolidate_threshold,
            ..Self::default()
        };
        config.ensure_valid()?;
        Ok(config)
    }

    /// Sets the consolidation importance bump.
    #[must_use]
    pub fn with_consolidation_bump(mut self, bump: f32) -> Self {
        self.consolidation_bump = bump;
        self
    }

    /// Validates decay rate and thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error on any out-of-range value.
    pub fn ensure_valid(&self) -> Result<()> {
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(Error::InvalidDecay {
                key: "decay_rate",
                value: self.decay_rate,
            });
        }
        for (key, value) in [
            ("archive_threshold", self.archive_threshold),
            ("consolidation_bump", self.consolidation_bump),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidThreshold {
                    key,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        Ok(())
    }
}

/// Statistics for one maintenance pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceReport {
    /// Items moved to the archive.
    pub archived: usize,
    /// Items marked consolidated this pass.
    pub consolidated: usize,
    /// Items left active and untouched.
    pub retained: usize,
    /// Archive candidates that vanished before removal (no-op, not an error).
    pub skipped: usize,
    /// Identifiers of the items archived this pass.
    pub archived_ids: Vec<String>,
    /// False when the pass was rejected by the re-entrancy guard.
    pub completed: bool,
}

impl MaintenanceReport {
    /// Report for a pass rejected because another pass was already running.
    #[must_use]
    pub fn skipped_pass() -> Self {
        Self::default()
    }
}

/// Runs maintenance passes and owns the archive.
///
/// The archive is an append-only sequence: items enter when their effective
/// score falls below the threshold and never re-enter active rotation.
pub struct LifecycleManager {
    config: LifecycleConfig,
    archive: RwLock<Vec<MemoryItem>>,
    pass_active: AtomicBool,
}

impl LifecycleManager {
    /// Creates a manager with the given configuration and an empty archive.
    #[must_use]
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            config,
            archive: RwLock::new(Vec::new()),
            pass_active: AtomicBool::new(false),
        }
    }

    /// Returns the lifecycle configuration.
    #[must_use]
    pub const fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Computes an item's effective score at time `now`:
    /// `importance * exp(-decay_rate * hours_idle)`.
    ///
    /// Derived on demand, never stored. Distinct from the retrieval engine's
    /// composite relevance score.
    #[must_use]
    pub fn effective_score(&self, item: &MemoryItem, now: i64) -> f32 {
        let idle_hours = (now - item.last_accessed).max(0) as f32 / SECONDS_PER_HOUR;
        item.importance * (-self.config.decay_rate * idle_hours).exp()
    }

    /// Runs one maintenance pass over the given stores.
    ///
    /// Each store is processed in two phases: iterate a consistent snapshot
    /// collecting archive candidates, then remove them once iteration is
    /// done. Removal re-validates that the id still exists — a candidate
    /// already gone (e.g. removed concurrently) is counted as skipped.
    ///
    /// If a pass is already running, the call returns immediately with
    /// `completed == false` and touches nothing.
    pub fn decay_and_maintain(&self, stores: &[&MemoryStore]) -> MaintenanceReport {
        if self
            .pass_active
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            tracing::warn!("maintenance pass already running, skipping");
            return MaintenanceReport::skipped_pass();
        }
        let _guard = PassGuard(&self.pass_active);

        let now = now_secs();
        let mut report = MaintenanceReport {
            completed: true,
            ..MaintenanceReport::default()
        };

        for store in stores {
            let mut to_archive: Vec<String> = Vec::new();

            for item in store.snapshot() {
                let effective = self.effective_score(&item, now);

                if effective < self.config.archive_threshold {
                    // Archival takes priority over consolidation.
                    tracing::debug!(
                        id = %item.id,
                        tier = %store.tier(),
                        score = effective,
                        "archiving memory"
                    );
                    to_archive.push(item.id);
                } else if item.access_count > self.config.consolidate_threshold {
                    tracing::debug!(
                        id = %item.id,
                        tier = %store.tier(),
                        access_count = item.access_count,
                        "consolidating memory"
                    );
                    if store.mark_consolidated(&item.id, self.config.consolidation_bump) {
                        report.consolidated += 1;
                    } else {
                        report.skipped += 1;
                    }
                } else {
                    report.retained += 1;
                }
            }

            for id in to_archive {
                match store.remove(&id) {
                    Some(item) => {
                        self.archive.write().push(item);
                        report.archived += 1;
                        report.archived_ids.push(id);
                    }
                    None => report.skipped += 1,
                }
            }
        }

        tracing::info!(
            archived = report.archived,
            consolidated = report.consolidated,
            retained = report.retained,
            "maintenance cycle complete"
        );

        report
    }

    /// Returns a copy of the archived items, oldest first.
    #[must_use]
    pub fn archived(&self) -> Vec<MemoryItem> {
        self.archive.read().clone()
    }

    /// Returns the number of archived items.
    #[must_use]
    pub fn archive_len(&self) -> usize {
        self.archive.read().len()
    }
}

/// Releases the pass guard even if a pass unwinds.
struct PassGuard<'a>(&'a AtomicBool);

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
