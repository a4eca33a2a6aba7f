//! Bounded, ordered plant catalog.
//!
//! The catalog owns an [`AggregateTracker`] and registers or unregisters
//! plants as they enter or leave, so membership and the running aggregate
//! cannot drift apart.

use flora_core::{CatalogError, ValidationResult};

use crate::plant::{AgeCategory, HeightChange, Plant, PlantType};
use crate::tracker::AggregateTracker;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
pub struct PlantCatalog {
    plants: Vec<Plant>,
    max_capacity: usize,
    aggregate: AggregateTracker,
}

impl PlantCatalog {
    pub fn new(max_capacity: usize) -> Result<Self, CatalogError> {
        if max_capacity < 1 {
            return Err(CatalogError::InvalidCapacity {
                requested: max_capacity,
                minimum: 1,
            });
        }
        Ok(Self {
            plants: Vec::new(),
            max_capacity,
            aggregate: AggregateTracker::new(),
        })
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Change the capacity. It may not drop below 1 or below the current size.
    pub fn set_max_capacity(&mut self, max_capacity: usize) -> Result<(), CatalogError> {
        let minimum = self.plants.len().max(1);
        if max_capacity < minimum {
            return Err(CatalogError::InvalidCapacity {
                requested: max_capacity,
                minimum,
            });
        }
        self.max_capacity = max_capacity;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.plants.len() >= self.max_capacity
    }

    /// Running count and height over the catalog's members.
    pub fn aggregate(&self) -> &AggregateTracker {
        &self.aggregate
    }

    /// Append `plant` unless the catalog is full.
    pub fn try_add(&mut self, plant: Plant) -> bool {
        if self.is_full() {
            tracing::warn!(
                name = %plant.name(),
                capacity = self.max_capacity,
                "catalog full; plant rejected"
            );
            return false;
        }
        self.aggregate.register(&plant);
        tracing::debug!(plant = %plant.id(), name = %plant.name(), "plant added");
        self.plants.push(plant);
        true
    }

    /// Add plants in order until the catalog is full; returns how many were added.
    ///
    /// Plants left over once capacity is reached are dropped.
    pub fn try_add_all(&mut self, plants: impl IntoIterator<Item = Plant>) -> usize {
        let mut added = 0;
        for plant in plants {
            if !self.try_add(plant) {
                break;
            }
            added += 1;
        }
        added
    }

    pub fn try_remove_at(&mut self, index: usize) -> bool {
        if index >= self.plants.len() {
            return false;
        }
        let plant = self.plants.remove(index);
        if !self.aggregate.unregister(&plant) {
            tracing::warn!(plant = %plant.id(), "removed plant was not tracked");
        }
        tracing::debug!(plant = %plant.id(), name = %plant.name(), "plant removed");
        true
    }

    /// Remove every plant whose name equals `name`, ignoring case.
    pub fn remove_all_by_name(&mut self, name: &str) {
        let needle = name.to_lowercase();
        let aggregate = &mut self.aggregate;
        self.plants.retain(|plant| {
            if plant.name().to_lowercase() == needle {
                if !aggregate.unregister(plant) {
                    tracing::warn!(plant = %plant.id(), "removed plant was not tracked");
                }
                false
            } else {
                true
            }
        });
    }

    pub fn clear(&mut self) {
        let removed = self.plants.len();
        self.plants.clear();
        self.aggregate.reset();
        tracing::info!(removed, "catalog cleared");
    }

    pub fn get(&self, index: usize) -> Option<&Plant> {
        self.plants.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plant> {
        self.plants.iter()
    }

    /// Run a fallible mutation on the plant at `index`.
    ///
    /// Returns `None` if the index is out of bounds. Any height change made by
    /// `f` is folded into the aggregate, whether or not `f` succeeds. If `f`
    /// replaces the plant outright, the old copy is unregistered and the
    /// replacement registered in its place.
    pub fn update_at<T>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Plant) -> ValidationResult<T>,
    ) -> Option<ValidationResult<T>> {
        let plant = self.plants.get_mut(index)?;
        let (old_id, old_height) = (plant.id(), plant.height());
        let result = f(plant);

        if plant.id() != old_id {
            if !self.aggregate.unregister_copy(old_id, old_height) {
                tracing::warn!(plant = %old_id, "replaced plant was not tracked");
            }
            self.aggregate.register(plant);
            tracing::debug!(old = %old_id, new = %plant.id(), "plant replaced in place");
        } else if plant.height() != old_height {
            let change = HeightChange {
                plant: old_id,
                old: old_height,
                new: plant.height(),
            };
            if !self.aggregate.on_height_changed(change) {
                tracing::warn!(plant = %old_id, "height change on untracked plant");
            }
        }
        Some(result)
    }

    /// Case-insensitive substring match on name. An empty query matches nothing.
    pub fn find_by_name_substring(&self, query: &str) -> Vec<&Plant> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.plants
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn find_by_type(&self, plant_type: PlantType) -> Vec<&Plant> {
        self.plants
            .iter()
            .filter(|p| p.plant_type() == plant_type)
            .collect()
    }

    pub fn find_by_age_category(&self, category: AgeCategory) -> Vec<&Plant> {
        self.plants
            .iter()
            .filter(|p| p.age_category() == category)
            .collect()
    }

    /// Owned copy of the current contents, in order.
    pub fn snapshot(&self) -> Vec<Plant> {
        self.plants.clone()
    }
}

impl Default for PlantCatalog {
    fn default() -> Self {
        Self {
            plants: Vec::new(),
            max_capacity: DEFAULT_CAPACITY,
            aggregate: AggregateTracker::new(),
        }
    }
}
