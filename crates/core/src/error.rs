//! Domain error model.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type used by field validators and entity mutations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A field value was rejected.
///
/// Raised at construction or mutation. The entity being mutated is always left
/// in its prior state, so callers can recover by retrying with another value.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("invalid name {0:?}: must be 2-50 letters or spaces")]
    InvalidName(String),

    #[error("invalid plant type {0:?}")]
    InvalidType(String),

    #[error("invalid age {0}: must be between 0 and 5000 years")]
    InvalidAge(i64),

    #[error("invalid height {0}: must be greater than 0 and at most 115.7 m")]
    InvalidHeight(f64),

    #[error("invalid planting date {date}: {reason}")]
    InvalidPlantingDate { date: NaiveDate, reason: &'static str },

    #[error("invalid growth {0}: must be greater than 0")]
    InvalidGrowth(f64),
}

impl ValidationError {
    pub fn name(value: impl Into<String>) -> Self {
        Self::InvalidName(value.into())
    }

    pub fn plant_type(value: impl Into<String>) -> Self {
        Self::InvalidType(value.into())
    }

    pub fn planting_date(date: NaiveDate, reason: &'static str) -> Self {
        Self::InvalidPlantingDate { date, reason }
    }
}

/// Strict line parsing failed.
///
/// Token-level failures name the offending field; validation failures wrap
/// the underlying [`ValidationError`] as their source.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatError {
    #[error("line is empty")]
    Empty,

    #[error("expected 6 comma-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("cannot parse {field} from {value:?}")]
    Field {
        field: &'static str,
        value: String,
        #[source]
        cause: TokenError,
    },

    #[error("record rejected")]
    Invalid(#[from] ValidationError),
}

impl FormatError {
    pub fn field(
        field: &'static str,
        value: impl Into<String>,
        cause: impl core::fmt::Display,
    ) -> Self {
        Self::Field {
            field,
            value: value.into(),
            cause: TokenError(cause.to_string()),
        }
    }
}

/// Underlying reason a token did not parse, kept as text so [`FormatError`]
/// stays `Clone` and comparable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TokenError(String);

/// Catalog configuration was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid capacity {requested}: must be at least {minimum}")]
    InvalidCapacity { requested: usize, minimum: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn format_error_exposes_validation_cause_as_source() {
        let err = FormatError::from(ValidationError::InvalidAge(-3));
        let source = err.source().expect("wrapped cause");
        assert_eq!(
            source.to_string(),
            "invalid age -3: must be between 0 and 5000 years"
        );
    }

    #[test]
    fn field_error_names_field_and_token() {
        let cause = "abc".parse::<i64>().unwrap_err();
        let err = FormatError::field("age", "abc", &cause);
        assert_eq!(err.to_string(), "cannot parse age from \"abc\"");
        assert_eq!(err.source().expect("token cause").to_string(), cause.to_string());
    }
}
