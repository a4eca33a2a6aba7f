//! Bulk conversion between plant collections and text.
//!
//! Two formats are supported: the comma-delimited line format (one record per
//! line after a fixed header) and a structured JSON array with localized field
//! names. Both operate on in-memory text only; reading and writing files is
//! left to the caller.

pub mod error;
pub mod format;
pub mod lines;
pub mod structured;

pub use error::ImportError;
pub use format::{Format, Imported};
pub use lines::{LINE_HEADER, export_lines, import_lines};
pub use structured::{PlantRecord, export_structured, import_structured};
