use std::path::Path;

use flora_plants::Plant;

use crate::error::ImportError;
use crate::lines::{export_lines, import_lines};
use crate::structured::{export_structured, import_structured};

/// Text format of a plant collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-delimited, one plant per line.
    Lines,
    /// JSON array with localized labels.
    Structured,
}

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Imported {
    pub plants: Vec<Plant>,
    /// Rows dropped because they did not parse. Always zero for the
    /// structured format, which fails instead.
    pub skipped: usize,
}

impl Format {
    /// Pick a format from the file extension (`.csv`/`.txt` or `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Format::Lines),
            "json" => Some(Format::Structured),
            _ => None,
        }
    }

    pub fn export<'a>(
        self,
        plants: impl IntoIterator<Item = &'a Plant>,
    ) -> serde_json::Result<String> {
        match self {
            Format::Lines => Ok(export_lines(plants)),
            Format::Structured => export_structured(plants),
        }
    }

    pub fn import(self, text: &str) -> Result<Imported, ImportError> {
        match self {
            Format::Lines => Ok(import_lines(text)),
            Format::Structured => Ok(Imported {
                plants: import_structured(text)?,
                skipped: 0,
            }),
        }
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Format::Lines => f.write_str("csv"),
            Format::Structured => f.write_str("json"),
        }
    }
}

impl core::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "lines" => Ok(Format::Lines),
            "json" | "structured" => Ok(Format::Structured),
            other => Err(format!("unknown format {other:?} (expected csv or json)")),
        }
    }
}
