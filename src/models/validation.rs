//! Validation functions for attraction records
//!
//! Reusable checks for the field shapes a catalog document carries: slugs,
//! ratings, prices and coordinates. Functions prefixed `validate_` and
//! returning `validator::ValidationError` plug into `#[derive(Validate)]`;
//! the numeric checks return the catalog's own error type.

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

use super::error::{ValidationError as ModelValidationError, ValidationErrorKind, ValidationResult};

static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
static NON_SLUG_RUN_REGEX: OnceLock<Regex> = OnceLock::new();

/// Highest rating a record may carry
pub const MAX_RATING: f64 = 5.0;

/// Validator code reported by [`validate_slug`]
pub const SLUG_CODE: &str = "invalid_slug";

/// Validator code reported by [`validate_not_blank`]
pub const REQUIRED_CODE: &str = "required";

fn slug_regex() -> &'static Regex {
    SLUG_REGEX.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid slug regex pattern")
    })
}

fn non_slug_run_regex() -> &'static Regex {
    NON_SLUG_RUN_REGEX
        .get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid slug separator regex pattern"))
}

/// Check whether a string is already in slug form
pub fn is_slug(value: &str) -> bool {
    slug_regex().is_match(value)
}

/// Derive the slug form of a display name
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen and trims hyphens from both ends. Non-ASCII letters count as
/// separators, so `"Café Nicola"` becomes `"caf-nicola"`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    non_slug_run_regex()
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Validate slug format for validator crate
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    if is_slug(value) {
        Ok(())
    } else {
        Err(ValidationError::new(SLUG_CODE))
    }
}

/// Validate that a string carries visible content, for validator crate
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(REQUIRED_CODE))
    } else {
        Ok(())
    }
}

/// Validate that a number is finite and within `[min, max]`
pub fn validate_range(value: f64, min: f64, max: f64, field_name: &str) -> ValidationResult<f64> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(ModelValidationError::with_context(
            ValidationErrorKind::OutOfRange { min, max },
            field_name,
            format!("Got: {}", value),
        ))
    }
}

/// Validate a rating on the zero-to-five scale
pub fn validate_rating(rating: f64, field_name: &str) -> ValidationResult<f64> {
    validate_range(rating, 0.0, MAX_RATING, field_name)
}

/// Validate that a price is finite and non-negative
pub fn validate_price(price: f64, field_name: &str) -> ValidationResult<f64> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(ModelValidationError::with_context(
            ValidationErrorKind::NegativeAmount,
            field_name,
            format!("Price must be non-negative, got: {}", price),
        ))
    }
}

/// Validate an optional secondary price
pub fn validate_optional_price(price: Option<f64>, field_name: &str) -> ValidationResult<()> {
    match price {
        Some(value) => validate_price(value, field_name).map(|_| ()),
        None => Ok(()),
    }
}

/// Validate a latitude/longitude pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), Vec<ModelValidationError>> {
    let mut errors = Vec::new();
    if let Err(e) = validate_range(latitude, -90.0, 90.0, "location.coordinates.latitude") {
        errors.push(e);
    }
    if let Err(e) = validate_range(longitude, -180.0, 180.0, "location.coordinates.longitude") {
        errors.push(e);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate that a document's id agrees with the key it was stored under
pub fn validate_storage_key(id: &str, storage_key: &str) -> ValidationResult<()> {
    if id == storage_key {
        Ok(())
    } else {
        Err(ModelValidationError::with_context(
            ValidationErrorKind::IdMismatch,
            "id",
            format!("document id {:?} stored as {:?}", id, storage_key),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        let cases = vec![
            ("Belém Tower", "bel-m-tower"),
            ("Jerónimos Monastery", "jer-nimos-monastery"),
            ("  LX Factory  ", "lx-factory"),
            ("Tram 28", "tram-28"),
            ("Oceanário de Lisboa", "ocean-rio-de-lisboa"),
            ("--São Jorge Castle!!", "s-o-jorge-castle"),
            ("Time Out Market", "time-out-market"),
            ("", ""),
            ("!!!", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(slugify(input), expected, "slugify({:?})", input);
        }
    }

    #[test]
    fn test_slugify_output_is_slug() {
        for name in ["Alpha Museum", "Padrão dos Descobrimentos", "MAAT - Museum of Art"] {
            assert!(is_slug(&slugify(name)));
        }
    }

    #[test]
    fn test_is_slug() {
        assert!(is_slug("belem-tower"));
        assert!(is_slug("tram-28"));
        assert!(is_slug("a"));

        assert!(!is_slug(""));
        assert!(!is_slug("Belem-Tower"));
        assert!(!is_slug("belem--tower"));
        assert!(!is_slug("-belem"));
        assert!(!is_slug("../etc/passwd"));
        assert!(!is_slug("belem tower"));
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("lx-factory").is_ok());
        assert_eq!(validate_slug("LX Factory").unwrap_err().code, SLUG_CODE);
    }

    #[test]
    fn test_validate_rating() {
        assert_eq!(validate_rating(0.0, "rating").unwrap(), 0.0);
        assert_eq!(validate_rating(4.7, "rating").unwrap(), 4.7);
        assert_eq!(validate_rating(5.0, "rating").unwrap(), 5.0);

        assert!(validate_rating(-0.1, "rating").is_err());
        assert!(validate_rating(5.1, "rating").is_err());
        assert!(validate_rating(f64::NAN, "rating").is_err());

        let err = validate_rating(5.5, "rating").unwrap_err();
        assert_eq!(err.field, "rating");
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange { min: 0.0, max: MAX_RATING });
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0, "adult").is_ok());
        assert!(validate_price(15.5, "adult").is_ok());
        assert!(validate_price(-1.0, "adult").is_err());
        assert!(validate_price(f64::INFINITY, "adult").is_err());

        assert!(validate_optional_price(None, "child").is_ok());
        assert!(validate_optional_price(Some(-2.0), "child").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(38.6916, -9.2160).is_ok());

        let errors = validate_coordinates(91.0, -181.0).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Alpha").is_ok());
        assert_eq!(validate_not_blank("   ").unwrap_err().code, REQUIRED_CODE);
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key("belem-tower", "belem-tower").is_ok());

        let err = validate_storage_key("belem-tower", "torre-de-belem").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::IdMismatch);
    }
}
