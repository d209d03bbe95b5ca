//! Input validation utilities.
//!
//! This module contains the field checks used by the patient model. Each check records
//! its failure in a [`ValidationErrors`] collector and carries on, so that a single
//! request reports every rejected field at once.

/// A single field that failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every violation found while validating one patient.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Returns true if any violation was recorded against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Records a "field required" violation if `value` is absent.
pub(crate) fn require<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<T>,
) -> Option<T> {
    if value.is_none() {
        errors.push(field, "field required");
    }
    value
}

/// Trims `value` and checks that its length, counted in characters, lies within
/// `min..=max`.
///
/// # Returns
///
/// The trimmed text if it is present and within bounds.
pub(crate) fn bounded_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
    min: usize,
    max: usize,
) -> Option<String> {
    let value = require(errors, field, value)?;
    let trimmed = value.trim();
    let len = trimmed.chars().count();

    if len < min {
        errors.push(field, format!("must be at least {min} characters"));
        return None;
    }
    if len > max {
        errors.push(field, format!("must be at most {max} characters"));
        return None;
    }

    Some(trimmed.to_owned())
}

/// Checks that an integer is strictly positive and fits the stored representation.
pub(crate) fn positive_int(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<i64>,
) -> Option<u32> {
    let value = require(errors, field, value)?;

    if value <= 0 {
        errors.push(field, "must be greater than 0");
        return None;
    }

    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            errors.push(field, format!("must be at most {}", u32::MAX));
            None
        }
    }
}

/// Checks that a float is finite and strictly positive.
pub(crate) fn positive_float(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<f64>,
) -> Option<f64> {
    let value = require(errors, field, value)?;

    if !value.is_finite() {
        errors.push(field, "must be a finite number");
        return None;
    }
    if value <= 0.0 {
        errors.push(field, "must be greater than 0");
        return None;
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_text_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        // Two characters, four bytes.
        let value = bounded_text(&mut errors, "name", Some("Jé".into()), 2, 3);
        assert_eq!(value.as_deref(), Some("Jé"));
        assert!(errors.is_empty());

        let value = bounded_text(&mut errors, "name", Some("Jéan".into()), 2, 3);
        assert_eq!(value, None);
        assert!(errors.has_field("name"));
    }

    #[test]
    fn test_bounded_text_trims_before_measuring() {
        let mut errors = ValidationErrors::new();
        let value = bounded_text(&mut errors, "city", Some("  A  ".into()), 2, 100);
        assert_eq!(value, None);
        assert_eq!(
            errors.violations()[0].message,
            "must be at least 2 characters"
        );
    }

    #[test]
    fn test_numeric_checks_reject_non_positive_values() {
        let mut errors = ValidationErrors::new();
        assert_eq!(positive_int(&mut errors, "age", Some(0)), None);
        assert_eq!(positive_int(&mut errors, "age", Some(-4)), None);
        assert_eq!(positive_int(&mut errors, "age", Some(i64::MAX)), None);
        assert_eq!(positive_float(&mut errors, "height", Some(0.0)), None);
        assert_eq!(positive_float(&mut errors, "weight", Some(f64::NAN)), None);
        assert_eq!(errors.violations().len(), 5);

        let mut errors = ValidationErrors::new();
        assert_eq!(positive_int(&mut errors, "age", Some(30)), Some(30));
        assert_eq!(positive_float(&mut errors, "height", Some(1.75)), Some(1.75));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_values_are_reported() {
        let mut errors = ValidationErrors::new();
        assert_eq!(positive_float(&mut errors, "weight", None), None);
        assert_eq!(errors.to_string(), "weight: field required");
    }

    #[test]
    fn test_display_joins_every_violation() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "must be at least 2 characters");
        errors.push("age", "must be greater than 0");
        assert_eq!(
            errors.to_string(),
            "name: must be at least 2 characters; age: must be greater than 0"
        );
    }
}
