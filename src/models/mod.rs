//! Data models for the attraction catalog
//!
//! This module contains the attraction record and its nested groups, the
//! validation applied to every parsed document, and the slug transformation
//! used to resolve name-based references.

pub mod attraction;
pub mod error;
pub mod validation;

// Re-export commonly used types
pub use attraction::{
    Accessibility, AdmissionPrices, Attraction, Coordinates, CruisePassengerInfo, Description,
    Features, Image, Images, Location, NearbyAttraction, SeasonalHours, VisitingInformation,
};
pub use error::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use validation::{is_slug, slugify};
