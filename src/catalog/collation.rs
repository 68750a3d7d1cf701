//! Locale-aware name ordering
//!
//! Display names are ordered the way a reader expects rather than by raw
//! code points: accents and case only break ties. The comparison works in
//! three levels, mirroring a Unicode collator with default strength:
//!
//! 1. base letters, with accents stripped and case folded
//! 2. accents (unaccented before accented)
//! 3. case (lowercase before uppercase)
//!
//! Names equal on all three levels fall back to code-point order so the
//! result is a total order.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Precomputed sort key for a display name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: Vec<bool>,
    raw: String,
}

impl CollationKey {
    pub fn new(value: &str) -> Self {
        let decomposed: Vec<char> = value.nfd().collect();

        let primary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .flat_map(|c| c.to_lowercase())
            .collect();

        let secondary = decomposed.iter().flat_map(|c| c.to_lowercase()).collect();

        let tertiary = decomposed
            .iter()
            .filter(|c| !is_combining_mark(**c))
            .map(|c| c.is_uppercase())
            .collect();

        Self {
            primary,
            secondary,
            tertiary,
            raw: value.to_string(),
        }
    }
}
