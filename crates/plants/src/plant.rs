use chrono::{Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use flora_core::{FormatError, PlantId, ValidationError, ValidationResult};

use crate::validate::{
    today, validate_age, validate_growth, validate_height, validate_name, validate_planting_date,
};

/// Height added by [`Plant::grow_default`].
pub const DEFAULT_GROWTH: f64 = 0.1;
/// Height added per year by [`Plant::grow_by_years`].
pub const GROWTH_PER_YEAR: f64 = 0.2;
/// Number of comma-separated fields in the line format.
pub const FIELD_COUNT: usize = 6;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";
const WATERING_FORMAT: &str = "%d.%m.%Y %H:%M";
const NEVER_WATERED: &str = "never";

/// Botanical type of a plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantType {
    Tree,
    Shrub,
    Flower,
    Grass,
    Fern,
    Cactus,
    Vine,
}

impl PlantType {
    pub const ALL: [PlantType; 7] = [
        PlantType::Tree,
        PlantType::Shrub,
        PlantType::Flower,
        PlantType::Grass,
        PlantType::Fern,
        PlantType::Cactus,
        PlantType::Vine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantType::Tree => "Tree",
            PlantType::Shrub => "Shrub",
            PlantType::Flower => "Flower",
            PlantType::Grass => "Grass",
            PlantType::Fern => "Fern",
            PlantType::Cactus => "Cactus",
            PlantType::Vine => "Vine",
        }
    }
}

impl core::fmt::Display for PlantType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant names are matched exactly (case-sensitive).
impl core::str::FromStr for PlantType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlantType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::plant_type(s))
    }
}

/// Age bracket derived from a plant's age in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeCategory {
    Young,
    Adult,
    Old,
}

impl AgeCategory {
    pub fn for_age(age: u32) -> Self {
        if age < 2 {
            AgeCategory::Young
        } else if age < 10 {
            AgeCategory::Adult
        } else {
            AgeCategory::Old
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeCategory::Young => "young",
            AgeCategory::Adult => "adult",
            AgeCategory::Old => "old",
        }
    }
}

impl core::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown age category {0:?} (expected young, adult or old)")]
pub struct UnknownAgeCategory(String);

impl core::str::FromStr for AgeCategory {
    type Err = UnknownAgeCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "young" => Ok(AgeCategory::Young),
            "adult" => Ok(AgeCategory::Adult),
            "old" => Ok(AgeCategory::Old),
            _ => Err(UnknownAgeCategory(s.to_string())),
        }
    }
}

/// Receipt for a height mutation.
///
/// Returned by every operation that changes a plant's height so that an
/// [`crate::AggregateTracker`] holding the plant can reconcile its total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightChange {
    pub plant: PlantId,
    pub old: f64,
    pub new: f64,
}

impl HeightChange {
    pub fn delta(&self) -> f64 {
        self.new - self.old
    }
}

/// How [`parse_record`] treats its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Tokens are taken verbatim.
    Strict,
    /// Tokens are trimmed before parsing.
    Lenient,
}

/// A validated plant record.
///
/// Fields are private; every constructor and setter runs the validators in
/// [`crate::validate`] and leaves the record untouched on failure.
///
/// Equality compares the six persisted fields (name, type, age, height,
/// planting date, flowering). Identity and watering state are ignored.
#[derive(Debug, Clone)]
pub struct Plant {
    id: PlantId,
    name: String,
    plant_type: PlantType,
    age: u32,
    height: f64,
    planting_date: NaiveDate,
    flowering: bool,
    last_watered: Option<String>,
}

impl Plant {
    /// Create a plant from explicit field values. Flowering defaults to `true`.
    pub fn new(
        name: &str,
        plant_type: PlantType,
        age: i64,
        height: f64,
        planting_date: NaiveDate,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: PlantId::new(),
            name: validate_name(name)?,
            plant_type,
            age: validate_age(age)?,
            height: validate_height(height)?,
            planting_date: validate_planting_date(planting_date)?,
            flowering: true,
            last_watered: None,
        })
    }

    /// A young flower called "Unnamed", planted today.
    pub fn with_defaults() -> ValidationResult<Self> {
        Self::new("Unnamed", PlantType::Flower, 1, 0.1, today())
    }

    /// One year old, half a metre tall, planted today.
    pub fn from_name_and_type(name: &str, plant_type: PlantType) -> ValidationResult<Self> {
        Self::new(name, plant_type, 1, 0.5, today())
    }

    /// A one-metre tree planted `age` years before today.
    ///
    /// Ages that would put the planting date before 1900 are rejected by the
    /// planting-date validator.
    pub fn from_name_and_age(name: &str, age: i64) -> ValidationResult<Self> {
        let years = validate_age(age)?;
        let planted = today()
            .checked_sub_months(Months::new(years * 12))
            .ok_or(ValidationError::InvalidAge(age))?;
        Self::new(name, PlantType::Tree, age, 1.0, planted)
    }

    pub fn with_flowering(mut self, flowering: bool) -> Self {
        self.flowering = flowering;
        self
    }

    pub fn id(&self) -> PlantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plant_type(&self) -> PlantType {
        self.plant_type
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn planting_date(&self) -> NaiveDate {
        self.planting_date
    }

    pub fn is_flowering(&self) -> bool {
        self.flowering
    }

    /// Recomputed from `age` on every call.
    pub fn age_category(&self) -> AgeCategory {
        AgeCategory::for_age(self.age)
    }

    /// Timestamp of the last watering, or `"never"`.
    pub fn last_watered(&self) -> &str {
        self.last_watered.as_deref().unwrap_or(NEVER_WATERED)
    }

    pub fn is_mature(&self) -> bool {
        self.age > 5
    }

    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    pub fn set_type(&mut self, plant_type: PlantType) {
        self.plant_type = plant_type;
    }

    pub fn set_age(&mut self, age: i64) -> ValidationResult<()> {
        self.age = validate_age(age)?;
        Ok(())
    }

    pub fn set_height(&mut self, height: f64) -> ValidationResult<HeightChange> {
        let height = validate_height(height)?;
        Ok(self.replace_height(height))
    }

    pub fn set_planting_date(&mut self, date: NaiveDate) -> ValidationResult<()> {
        self.planting_date = validate_planting_date(date)?;
        Ok(())
    }

    pub fn set_flowering(&mut self, flowering: bool) {
        self.flowering = flowering;
    }

    /// Grow by `amount` metres.
    pub fn grow(&mut self, amount: f64) -> ValidationResult<HeightChange> {
        let amount = validate_growth(amount)?;
        let height = validate_height(self.height + amount)?;
        Ok(self.replace_height(height))
    }

    pub fn grow_default(&mut self) -> ValidationResult<HeightChange> {
        self.grow(DEFAULT_GROWTH)
    }

    /// Age by `years` and grow [`GROWTH_PER_YEAR`] metres for each of them.
    ///
    /// Both the new age and the new height must pass validation before either
    /// is applied.
    pub fn grow_by_years(&mut self, years: i32) -> ValidationResult<HeightChange> {
        if years <= 0 {
            return Err(ValidationError::InvalidGrowth(f64::from(years)));
        }
        let height = validate_height(self.height + GROWTH_PER_YEAR * f64::from(years))?;
        let age = validate_age(i64::from(self.age) + i64::from(years))?;
        self.age = age;
        Ok(self.replace_height(height))
    }

    pub fn water(&mut self) -> &str {
        self.water_with(None, None)
    }

    /// Record a watering. The liquid label and volume are logged, not stored.
    pub fn water_with(&mut self, liquid: Option<&str>, millilitres: Option<u32>) -> &str {
        let stamp = Local::now().format(WATERING_FORMAT).to_string();
        tracing::debug!(
            plant = %self.id,
            name = %self.name,
            liquid,
            millilitres,
            at = %stamp,
            "plant watered"
        );
        self.last_watered = Some(stamp);
        self.last_watered()
    }

    /// "Name (Type) - N years, H m"
    pub fn description(&self) -> String {
        format!(
            "{} ({}) - {} years, {} m",
            self.name, self.plant_type, self.age, self.height
        )
    }

    pub fn planting_info(&self) -> String {
        format!(
            "{} was planted on {}.",
            self.name,
            self.planting_date.format(DISPLAY_DATE_FORMAT)
        )
    }

    /// `name,type,age,height,YYYY-MM-DD,flowering`
    ///
    /// Height uses `.` as decimal separator and the shortest representation
    /// that parses back to the same value.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            self.name,
            self.plant_type,
            self.age,
            self.height,
            self.planting_date.format(DATE_FORMAT),
            self.flowering
        )
    }

    /// Strict parse of a single line. See [`parse_record`].
    pub fn parse_line(line: &str) -> Result<Self, FormatError> {
        parse_record(line, ParseMode::Strict)
    }

    /// Lenient parse of a single line; any failure yields `None`.
    pub fn try_parse_line(line: &str) -> Option<Self> {
        parse_record(line, ParseMode::Lenient).ok()
    }

    fn replace_height(&mut self, height: f64) -> HeightChange {
        let old = self.height;
        self.height = height;
        HeightChange {
            plant: self.id,
            old,
            new: height,
        }
    }
}

impl PartialEq for Plant {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.plant_type == other.plant_type
            && self.age == other.age
            && self.height == other.height
            && self.planting_date == other.planting_date
            && self.flowering == other.flowering
    }
}

impl core::fmt::Display for Plant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_line())
    }
}

impl core::str::FromStr for Plant {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plant::parse_line(s)
    }
}

/// Parse one line of the line format into a validated plant.
///
/// The line must have exactly six comma-separated fields. Tokens that do not
/// parse as their type fail with [`FormatError::Field`], carrying the parser's
/// error as source; values that parse but fail validation fail with
/// [`FormatError::Invalid`].
pub fn parse_record(line: &str, mode: ParseMode) -> Result<Plant, FormatError> {
    if line.trim().is_empty() {
        return Err(FormatError::Empty);
    }

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != FIELD_COUNT {
        return Err(FormatError::FieldCount { found: parts.len() });
    }
    let token = |i: usize| match mode {
        ParseMode::Strict => parts[i],
        ParseMode::Lenient => parts[i].trim(),
    };

    let plant_type: PlantType = token(1).parse()?;
    let age: i64 = token(2)
        .parse()
        .map_err(|e| FormatError::field("age", token(2), e))?;
    let height: f64 = token(3)
        .parse()
        .map_err(|e| FormatError::field("height", token(3), e))?;
    let planting_date = NaiveDate::parse_from_str(token(4), DATE_FORMAT)
        .map_err(|e| FormatError::field("planting date", token(4), e))?;
    let flowering = parse_flag(token(5))
        .ok_or_else(|| FormatError::field("flowering", token(5), "expected true or false"))?;

    Ok(Plant::new(token(0), plant_type, age, height, planting_date)?.with_flowering(flowering))
}

fn parse_flag(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
