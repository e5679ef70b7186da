//! Client-side input checks mirrored from the backend for quick feedback

use crate::constants::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyValue,
    InvalidNumber,
    NonFinite,
    MissingFromUnit,
    MissingToUnit,
}

impl ValidationError {
    pub fn message(self) -> &'static str {
        match self {
            ValidationError::EmptyValue => MSG_EMPTY_VALUE,
            ValidationError::InvalidNumber => MSG_INVALID_NUMBER,
            ValidationError::NonFinite => MSG_NON_FINITE,
            ValidationError::MissingFromUnit => MSG_NO_FROM_UNIT,
            ValidationError::MissingToUnit => MSG_NO_TO_UNIT,
        }
    }

    /// Whether the value field should grab keyboard focus
    pub fn focuses_value(self) -> bool {
        matches!(
            self,
            ValidationError::EmptyValue | ValidationError::InvalidNumber | ValidationError::NonFinite
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Input accepted for a batch conversion
#[derive(Debug, Clone, PartialEq)]
pub struct CommonInput {
    pub value: f64,
    pub from_unit: String,
}

/// Input accepted for a single conversion
#[derive(Debug, Clone, PartialEq)]
pub struct SingleInput {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

/// Checks shared by both conversion paths, in order: empty, numeric, finite, source unit.
pub fn validate_common(raw_value: &str, from_unit: Option<&str>) -> Result<CommonInput, ValidationError> {
    let trimmed = raw_value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyValue);
    }

    let value: f64 = trimmed.parse().map_err(|_| ValidationError::InvalidNumber)?;
    if value.is_nan() {
        return Err(ValidationError::InvalidNumber);
    }
    if !value.is_finite() {
        return Err(ValidationError::NonFinite);
    }

    let from_unit = match from_unit {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Err(ValidationError::MissingFromUnit),
    };

    Ok(CommonInput { value, from_unit })
}

pub fn validate_single(
    raw_value: &str,
    from_unit: Option<&str>,
    to_unit: Option<&str>,
) -> Result<SingleInput, ValidationError> {
    let common = validate_common(raw_value, from_unit)?;
    match to_unit {
        Some(code) if !code.is_empty() => Ok(SingleInput {
            value: common.value,
            from_unit: common.from_unit,
            to_unit: code.to_string(),
        }),
        _ => Err(ValidationError::MissingToUnit),
    }
}

/// Batch converts to every unit, so no target is required.
pub fn validate_batch(raw_value: &str, from_unit: Option<&str>) -> Result<CommonInput, ValidationError> {
    validate_common(raw_value, from_unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(validate_common(raw, Some("m")), Err(ValidationError::EmptyValue));
        }
    }

    #[test]
    fn rejects_non_numeric() {
        for raw in ["abc", "12abc", "1,5", "--1", "NaN", "."] {
            assert_eq!(
                validate_common(raw, Some("m")),
                Err(ValidationError::InvalidNumber),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_non_finite() {
        for raw in ["inf", "-infinity", "1e400"] {
            assert_eq!(validate_common(raw, Some("m")), Err(ValidationError::NonFinite), "input {raw:?}");
        }
    }

    #[test]
    fn value_checked_before_units() {
        assert_eq!(validate_single("", None, None), Err(ValidationError::EmptyValue));
        assert_eq!(validate_single("5", None, None), Err(ValidationError::MissingFromUnit));
        assert_eq!(validate_single("5", Some("m"), None), Err(ValidationError::MissingToUnit));
        assert_eq!(validate_single("5", Some("m"), Some("")), Err(ValidationError::MissingToUnit));
    }

    #[test]
    fn accepts_trimmed_numbers() {
        let input = validate_single("  -3.25e2 ", Some("m"), Some("ft")).unwrap();
        assert_eq!(input.value, -325.0);
        assert_eq!(input.from_unit, "m");
        assert_eq!(input.to_unit, "ft");
    }

    #[test]
    fn batch_ignores_target_unit() {
        let input = validate_batch("10", Some("kg")).unwrap();
        assert_eq!(input, CommonInput { value: 10.0, from_unit: "kg".into() });
    }

    #[test]
    fn focus_only_for_value_errors() {
        assert!(ValidationError::EmptyValue.focuses_value());
        assert!(ValidationError::NonFinite.focuses_value());
        assert!(!ValidationError::MissingFromUnit.focuses_value());
        assert!(!ValidationError::MissingToUnit.focuses_value());
    }
}
