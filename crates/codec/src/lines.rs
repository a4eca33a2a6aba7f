//! Comma-delimited line format.
//!
//! ```text
//! Name,Type,Age,Height,PlantingDate,IsFlowering
//! Rose,Flower,2,0.5,2023-05-15,true
//! ```
//!
//! Import is best-effort: rows that fail to parse are skipped and counted,
//! never reported as errors.

use flora_plants::Plant;
use flora_plants::plant::{ParseMode, parse_record};

use crate::format::Imported;

pub const LINE_HEADER: &str = "Name,Type,Age,Height,PlantingDate,IsFlowering";

/// Header followed by one line per plant, each terminated by `\n`.
pub fn export_lines<'a>(plants: impl IntoIterator<Item = &'a Plant>) -> String {
    let mut out = String::from(LINE_HEADER);
    out.push('\n');
    for plant in plants {
        out.push_str(&plant.to_line());
        out.push('\n');
    }
    out
}

/// Parse every line after the first.
///
/// Blank lines are ignored. Any other line that does not parse leniently is
/// skipped and counted in [`Imported::skipped`].
pub fn import_lines(text: &str) -> Imported {
    let mut imported = Imported::default();
    for (index, line) in text.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line, ParseMode::Lenient) {
            Ok(plant) => imported.plants.push(plant),
            Err(err) => {
                tracing::debug!(line = index + 1, error = %err, "skipping malformed row");
                imported.skipped += 1;
            }
        }
    }
    tracing::info!(
        loaded = imported.plants.len(),
        skipped = imported.skipped,
        "line import finished"
    );
    imported
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flora_plants::PlantType;

    fn sample() -> Vec<Plant> {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        vec![
            Plant::new("Rose", PlantType::Flower, 2, 0.5, d(2023, 5, 15)).unwrap(),
            Plant::new("Oak", PlantType::Tree, 150, 30.25, d(1950, 4, 1))
                .unwrap()
                .with_flowering(false),
        ]
    }

    #[test]
    fn export_writes_header_then_rows() {
        let text = export_lines(&sample());
        assert_eq!(
            text,
            "Name,Type,Age,Height,PlantingDate,IsFlowering\n\
             Rose,Flower,2,0.5,2023-05-15,true\n\
             Oak,Tree,150,30.25,1950-04-01,false\n"
        );
    }

    #[test]
    fn export_of_empty_collection_is_header_only() {
        assert_eq!(export_lines(&Vec::<Plant>::new()), format!("{LINE_HEADER}\n"));
    }

    #[test]
    fn import_round_trips_export() {
        let plants = sample();
        let imported = import_lines(&export_lines(&plants));
        assert_eq!(imported.plants, plants);
        assert_eq!(imported.skipped, 0);
    }

    #[test]
    fn header_is_always_skipped() {
        let imported = import_lines("Rose,Flower,2,0.5,2023-05-15,true\nFern,Fern,1,0.2,2022-01-01,false");
        assert_eq!(imported.plants.len(), 1);
        assert_eq!(imported.plants[0].name(), "Fern");
    }

    #[test]
    fn blank_lines_are_not_counted() {
        let text = format!("{LINE_HEADER}\n\nRose,Flower,2,0.5,2023-05-15,true\n   \n");
        let imported = import_lines(&text);
        assert_eq!(imported.plants.len(), 1);
        assert_eq!(imported.skipped, 0);
    }

    #[test]
    fn empty_text_imports_nothing() {
        assert_eq!(import_lines(""), Imported::default());
    }
}
