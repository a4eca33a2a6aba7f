//! Structured JSON format.
//!
//! A pretty-printed array of records keyed by Ukrainian field labels. Planting
//! date and derived state are not part of the format; imported records are
//! dated today. Import is all-or-nothing.
//!
//! Types are written as variant names. On import the type may also be given as
//! its declaration index (`0` for Tree through `6` for Vine), which is how older
//! files store it.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use flora_core::ValidationResult;
use flora_plants::{Plant, PlantType};

use crate::error::ImportError;

pub const NAME_LABEL: &str = "Назва";
pub const TYPE_LABEL: &str = "Тип";
pub const AGE_LABEL: &str = "Вік";
pub const HEIGHT_LABEL: &str = "Висота";
pub const FLOWERING_LABEL: &str = "Цвітуча";

/// Wire shape of one plant in the structured format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    #[serde(rename = "Назва")]
    pub name: String,
    #[serde(rename = "Тип", deserialize_with = "plant_type_name_or_index")]
    pub plant_type: PlantType,
    #[serde(rename = "Вік")]
    pub age: i64,
    #[serde(rename = "Висота")]
    pub height: f64,
    #[serde(rename = "Цвітуча", default = "flowering_default")]
    pub flowering: bool,
}

fn flowering_default() -> bool {
    true
}

fn plant_type_name_or_index<'de, D>(deserializer: D) -> Result<PlantType, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Index(u64),
        Name(PlantType),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Name(plant_type) => Ok(plant_type),
        Repr::Index(index) => usize::try_from(index)
            .ok()
            .and_then(|i| PlantType::ALL.get(i).copied())
            .ok_or_else(|| {
                serde::de::Error::invalid_value(
                    serde::de::Unexpected::Unsigned(index),
                    &"a plant type index from 0 to 6",
                )
            }),
    }
}

impl From<&Plant> for PlantRecord {
    fn from(plant: &Plant) -> Self {
        Self {
            name: plant.name().to_string(),
            plant_type: plant.plant_type(),
            age: i64::from(plant.age()),
            height: plant.height(),
            flowering: plant.is_flowering(),
        }
    }
}

impl PlantRecord {
    /// Validate the record into a plant planted on `planted`.
    pub fn into_plant(self, planted: NaiveDate) -> ValidationResult<Plant> {
        Ok(Plant::new(&self.name, self.plant_type, self.age, self.height, planted)?
            .with_flowering(self.flowering))
    }
}

pub fn export_structured<'a>(
    plants: impl IntoIterator<Item = &'a Plant>,
) -> serde_json::Result<String> {
    let records: Vec<PlantRecord> = plants.into_iter().map(PlantRecord::from).collect();
    serde_json::to_string_pretty(&records)
}

/// Parse a whole document. A JSON `null` yields an empty collection.
pub fn import_structured(text: &str) -> Result<Vec<Plant>, ImportError> {
    let records: Option<Vec<PlantRecord>> = serde_json::from_str(text)?;
    let planted = Local::now().date_naive();
    let plants = records
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_plant(planted)
                .map_err(|source| ImportError::InvalidRecord { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(loaded = plants.len(), "structured import finished");
    Ok(plants)
}
