//! Validation error types for attraction records
//!
//! These errors describe why a parsed document was rejected. They are kept
//! separate from the application error so the catalog loader can collect and
//! report them per record without failing the whole load.

use std::fmt;
use thiserror::Error;

use super::validation::{REQUIRED_CODE, SLUG_CODE};

/// A single field that failed validation
#[derive(Error, Debug, Clone)]
pub struct ValidationError {
    /// The kind of validation error
    pub kind: ValidationErrorKind,
    /// The field that failed validation (dotted path for nested fields)
    pub field: String,
    /// Optional additional context
    pub context: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            context: None,
        }
    }

    /// Create a validation error with additional context
    pub fn with_context(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            context: Some(context.into()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(
                f,
                "Validation failed for field '{}': {} - {}",
                self.field, self.kind, ctx
            ),
            None => write!(
                f,
                "Validation failed for field '{}': {}",
                self.field, self.kind
            ),
        }
    }
}

/// Specific validation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// Identifier is not a lowercase hyphenated slug
    #[error("Invalid slug (expected lowercase letters, digits and single hyphens)")]
    InvalidSlug,

    /// Field is required but blank
    #[error("Required field is missing or blank")]
    RequiredField,

    /// Numeric value outside its allowed range
    #[error("Value must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },

    /// Price below zero
    #[error("Amount must be non-negative")]
    NegativeAmount,

    /// Document id disagrees with the storage key it was read from
    #[error("Identifier does not match storage key")]
    IdMismatch,

    /// Error reported by a derived validator rule
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Collection of validation errors
#[derive(Debug, Default, Clone)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record the error of a failed check, if any
    pub fn check<T>(&mut self, result: ValidationResult<T>) {
        if let Err(e) = result {
            self.add(e);
        }
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Convert to a Result
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed with {} error(s):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  - {}", error)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

/// Flatten errors reported by `#[derive(Validate)]` rules
impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(report: validator::ValidationErrors) -> Self {
        let mut errors = Self::new();
        for (field, failures) in report.field_errors() {
            for failure in failures {
                let kind = match failure.code.as_ref() {
                    SLUG_CODE => ValidationErrorKind::InvalidSlug,
                    REQUIRED_CODE => ValidationErrorKind::RequiredField,
                    code => ValidationErrorKind::Custom(
                        failure
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| code.to_string()),
                    ),
                };
                errors.add(ValidationError::new(kind, field.to_string()));
            }
        }
        errors
    }
}

impl From<ValidationError> for crate::error::Error {
    fn from(err: ValidationError) -> Self {
        crate::error::Error::validation(err.to_string())
    }
}

impl From<ValidationErrors> for crate::error::Error {
    fn from(err: ValidationErrors) -> Self {
        crate::error::Error::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_with_context() {
        let error = ValidationError::with_context(
            ValidationErrorKind::IdMismatch,
            "id",
            "document says 'a', file is 'b.json'",
        );
        assert_eq!(error.field, "id");
        let display = error.to_string();
        assert!(display.contains("'id'"));
        assert!(display.contains("storage key"));
        assert!(display.contains("b.json"));
    }

    #[test]
    fn test_out_of_range_display() {
        let kind = ValidationErrorKind::OutOfRange { min: 0.0, max: 5.0 };
        assert_eq!(kind.to_string(), "Value must be between 0 and 5");
    }

    #[test]
    fn test_validation_errors_collection() {
        let mut errors = ValidationErrors::new();
        errors.check::<()>(Ok(()));
        assert!(errors.is_empty());

        errors.check::<()>(Err(ValidationError::new(
            ValidationErrorKind::InvalidSlug,
            "id",
        )));
        errors.add(ValidationError::new(
            ValidationErrorKind::RequiredField,
            "name",
        ));

        assert_eq!(errors.len(), 2);
        assert!(errors.to_string().starts_with("Validation failed with 2 error(s)"));
        assert!(errors.into_result(()).is_err());
    }
}
