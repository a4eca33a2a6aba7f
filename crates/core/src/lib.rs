//! `flora-core` — domain foundation building blocks for the plant catalog.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup).

pub mod error;
pub mod id;

pub use error::{CatalogError, FormatError, TokenError, ValidationError, ValidationResult};
pub use id::PlantId;
