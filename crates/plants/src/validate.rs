//! Field validators.
//!
//! Every constructor and setter on [`crate::Plant`] funnels through these
//! functions, so a plant can never hold a value they would reject.

use chrono::{Datelike, Local, NaiveDate};

use flora_core::{ValidationError, ValidationResult};

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_AGE: i64 = 5000;
/// Record height (Hyperion, a coast redwood).
pub const MAX_HEIGHT: f64 = 115.7;
pub const MIN_PLANTING_YEAR: i32 = 1900;

/// Validate a name and return its trimmed form.
///
/// Length is counted in characters after trimming. Only alphabetic characters
/// (any script) and spaces are allowed.
pub fn validate_name(value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < MIN_NAME_LEN || len > MAX_NAME_LEN {
        return Err(ValidationError::name(value));
    }
    if !trimmed.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(ValidationError::name(value));
    }
    Ok(trimmed.to_string())
}

pub fn validate_age(value: i64) -> ValidationResult<u32> {
    if !(0..=MAX_AGE).contains(&value) {
        return Err(ValidationError::InvalidAge(value));
    }
    Ok(value as u32)
}

/// Height must lie in `(0, 115.7]`. NaN and infinities are rejected.
pub fn validate_height(value: f64) -> ValidationResult<f64> {
    if value.is_finite() && value > 0.0 && value <= MAX_HEIGHT {
        Ok(value)
    } else {
        Err(ValidationError::InvalidHeight(value))
    }
}

/// Validate a planting date against the local calendar date.
pub fn validate_planting_date(date: NaiveDate) -> ValidationResult<NaiveDate> {
    validate_planting_date_on(date, today())
}

pub fn validate_planting_date_on(date: NaiveDate, today: NaiveDate) -> ValidationResult<NaiveDate> {
    if date.year() < MIN_PLANTING_YEAR {
        return Err(ValidationError::planting_date(date, "year is before 1900"));
    }
    if date > today {
        return Err(ValidationError::planting_date(date, "date is in the future"));
    }
    Ok(date)
}

/// Growth amounts must be strictly positive and finite.
pub fn validate_growth(amount: f64) -> ValidationResult<f64> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidGrowth(amount))
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("  Oak  ").unwrap(), "Oak");
    }

    #[test]
    fn name_accepts_non_latin_letters_and_inner_spaces() {
        assert_eq!(validate_name("Троянда чайна").unwrap(), "Троянда чайна");
    }

    #[test]
    fn name_length_bounds() {
        assert!(validate_name("Ab").is_ok());
        assert!(validate_name(&"a".repeat(50)).is_ok());
        assert!(matches!(validate_name("A"), Err(ValidationError::InvalidName(_))));
        assert!(matches!(
            validate_name(&"a".repeat(51)),
            Err(ValidationError::InvalidName(_))
        ));
        // Trimming happens before the length check.
        assert!(validate_name("  A  ").is_err());
    }

    #[test]
    fn name_rejects_empty_and_symbols() {
        for bad in ["", "   ", "Oak1", "Oak-tree", "Rose!"] {
            assert!(
                matches!(validate_name(bad), Err(ValidationError::InvalidName(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(validate_age(0).unwrap(), 0);
        assert_eq!(validate_age(5000).unwrap(), 5000);
        assert_eq!(validate_age(-1), Err(ValidationError::InvalidAge(-1)));
        assert_eq!(validate_age(5001), Err(ValidationError::InvalidAge(5001)));
    }

    #[test]
    fn height_lower_bound_is_exclusive() {
        assert!(validate_height(0.0).is_err());
        assert!(validate_height(-0.5).is_err());
        assert!(validate_height(0.001).is_ok());
        assert!(validate_height(115.7).is_ok());
        assert!(validate_height(115.71).is_err());
        assert!(validate_height(f64::NAN).is_err());
        assert!(validate_height(f64::INFINITY).is_err());
    }

    #[test]
    fn planting_date_window() {
        let today = date(2024, 6, 1);
        assert!(validate_planting_date_on(date(1900, 1, 1), today).is_ok());
        assert!(validate_planting_date_on(today, today).is_ok());
        assert!(matches!(
            validate_planting_date_on(date(1899, 12, 31), today),
            Err(ValidationError::InvalidPlantingDate { .. })
        ));
        assert!(matches!(
            validate_planting_date_on(date(2024, 6, 2), today),
            Err(ValidationError::InvalidPlantingDate { .. })
        ));
    }

    #[test]
    fn growth_must_be_positive() {
        assert!(validate_growth(0.1).is_ok());
        assert_eq!(validate_growth(0.0), Err(ValidationError::InvalidGrowth(0.0)));
        assert_eq!(validate_growth(-1.0), Err(ValidationError::InvalidGrowth(-1.0)));
    }
}
