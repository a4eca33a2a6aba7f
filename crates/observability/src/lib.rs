//! Logging setup shared by the flora binaries.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! binary's job, done once through [`init`].

pub mod tracing;

pub use crate::tracing::{LogFormat, init};
