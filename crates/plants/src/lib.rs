//! Plant domain module.
//!
//! This crate contains the validated plant record, the running height
//! aggregate and the bounded catalog, implemented purely as deterministic
//! in-memory domain logic (no IO, no storage).

pub mod catalog;
pub mod plant;
pub mod tracker;
pub mod validate;

pub use catalog::PlantCatalog;
pub use plant::{AgeCategory, HeightChange, ParseMode, Plant, PlantType, UnknownAgeCategory};
pub use tracker::AggregateTracker;
