//! Running count and height total over a set of registered plants.
//!
//! The tracker is independent of catalog membership: a plant can be
//! registered without living in any catalog. [`crate::PlantCatalog`] owns one
//! and keeps it in lockstep with its own contents; standalone trackers are
//! driven by the caller.

use std::collections::HashMap;

use flora_core::PlantId;

use crate::plant::{HeightChange, Plant};

#[derive(Debug, Clone, Default)]
pub struct AggregateTracker {
    /// Height last seen for each registered copy, keyed by identity. Clones
    /// share an identity, so one id can hold several copies.
    registered: HashMap<PlantId, Vec<f64>>,
    count: usize,
    total_height: f64,
}

impl AggregateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting `plant`.
    pub fn register(&mut self, plant: &Plant) {
        self.registered
            .entry(plant.id())
            .or_default()
            .push(plant.height());
        self.count += 1;
        self.total_height += plant.height();
    }

    /// Stop counting one copy of `plant`. Returns `false` if none is registered.
    ///
    /// Subtracts the height the tracker last recorded for that copy, so a
    /// plant mutated behind the tracker's back cannot skew the total.
    pub fn unregister(&mut self, plant: &Plant) -> bool {
        self.unregister_copy(plant.id(), plant.height())
    }

    /// Stop counting the copy of `id` recorded at `height`, or its last copy
    /// if no recorded height matches.
    pub(crate) fn unregister_copy(&mut self, id: PlantId, height: f64) -> bool {
        let Some(heights) = self.registered.get_mut(&id) else {
            return false;
        };
        let slot = heights
            .iter()
            .position(|h| *h == height)
            .unwrap_or(heights.len() - 1);
        let height = heights.swap_remove(slot);
        if heights.is_empty() {
            self.registered.remove(&id);
        }
        self.count -= 1;
        self.total_height -= height;
        if self.count == 0 {
            self.total_height = 0.0;
        }
        true
    }

    /// Apply a height change reported by a plant.
    ///
    /// Changes for plants that are not registered are ignored and `false` is
    /// returned; the total only ever reflects registered plants.
    pub fn on_height_changed(&mut self, change: HeightChange) -> bool {
        let slot = self
            .registered
            .get_mut(&change.plant)
            .and_then(|heights| heights.iter_mut().find(|h| **h == change.old));
        match slot {
            Some(height) => {
                *height = change.new;
                self.total_height += change.delta();
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, plant: &Plant) -> bool {
        self.registered.contains_key(&plant.id())
    }

    pub fn reset(&mut self) {
        self.registered.clear();
        self.count = 0;
        self.total_height = 0.0;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// Zero when nothing is registered.
    pub fn average_height(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_height / self.count as f64
        }
    }

    /// "total N, average height X.XX"
    pub fn describe(&self) -> String {
        format!(
            "total {}, average height {:.2}",
            self.count(),
            self.average_height()
        )
    }
}

impl core::fmt::Display for AggregateTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}
