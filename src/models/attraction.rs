//! Attraction record model
//!
//! One [`Attraction`] per catalog document. The JSON layout uses camelCase
//! keys (the postal address keeps `postal_code`). Identity, coordinates,
//! admission price, rating and the handful of flags the catalog aggregates
//! over are required; descriptive groups default to empty when absent.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::ValidationErrors;
use super::validation::{
    validate_coordinates, validate_not_blank, validate_optional_price, validate_price,
    validate_rating, validate_slug, validate_storage_key,
};

/// A single point of interest in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    /// Stable slug, also the document's file stem
    #[validate(custom(function = "validate_slug"))]
    pub id: String,

    /// Display name
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[serde(default)]
    pub tagline: String,

    /// Primary category
    #[serde(rename = "type")]
    pub kind: String,

    /// Secondary category labels, in authored order
    pub categories: Vec<String>,

    pub description: Description,

    pub location: Location,

    #[serde(default)]
    pub contact: Contact,

    pub visiting_information: VisitingInformation,

    pub cruise_passenger_info: CruisePassengerInfo,

    pub features: Features,

    #[serde(default)]
    pub images: Images,

    /// Soft references to other attractions, by display name
    #[serde(default)]
    pub nearby_attractions: Vec<NearbyAttraction>,

    /// Free-form labels, in authored order
    pub tags: Vec<String>,

    #[serde(default)]
    pub suitable_for: Vec<String>,

    #[serde(default)]
    pub weather_dependent: bool,

    #[serde(default)]
    pub indoor_activities: bool,

    #[serde(default)]
    pub outdoor_activities: bool,

    /// Categorical price band (`Free`, `$` .. `$$$$`)
    #[serde(default)]
    pub price_range: String,

    /// Zero to five
    pub rating: f64,

    pub review_count: u32,

    #[serde(default)]
    pub review_source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub short: String,
    /// Long-form text; paragraphs are separated by blank lines
    #[serde(default)]
    pub full: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance: Option<String>,
}

impl Description {
    /// Split the full description into its non-empty paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.full
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub address: Address,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub directions: Directions,
    #[serde(default)]
    pub distance_from_cruise_port: DistanceFromPort,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub postal_code: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Directions {
    pub general: String,
    pub from_cruise_port: String,
    pub public_transport: String,
    pub parking: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DistanceFromPort {
    pub meters: f64,
    pub walking_time: String,
    pub driving_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub website: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    pub social_media: SocialMedia,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitingInformation {
    #[serde(default)]
    pub opening_times: OpeningTimes,
    pub admission_prices: AdmissionPrices,
    #[serde(default)]
    pub average_visit_duration: String,
    #[serde(default)]
    pub best_time_to_visit: String,
    #[serde(default)]
    pub busy_periods: Vec<String>,
    #[serde(default)]
    pub advice_for_visitors: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpeningTimes {
    pub current_status: String,
    pub seasonal: Vec<SeasonalHours>,
    pub closed_dates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalHours {
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub days: String,
    /// Human-readable hours, e.g. `"10:00 - 18:00"`
    pub hours: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_admission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Ticket prices in `currency`; an adult price of zero means free entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionPrices {
    #[serde(default)]
    pub currency: String,
    pub adult: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub senior: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lisboa_card_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_ticket: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl AdmissionPrices {
    pub fn is_free(&self) -> bool {
        self.adult == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CruisePassengerInfo {
    pub ideal_for_cruise_passengers: bool,
    #[serde(default)]
    pub time_needed_from_port: String,
    #[serde(default)]
    pub accessibility: String,
    #[serde(default)]
    pub combinable_with: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Features {
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
    pub accessibility: Accessibility,
    #[serde(default)]
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessibility {
    pub wheelchair_accessible: bool,
    #[serde(default)]
    pub mobility_notes: String,
    #[serde(default)]
    pub visual_aid_services: bool,
    #[serde(default)]
    pub hearing_aid_services: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Images {
    pub hero_image: Image,
    pub gallery: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub alt: String,
    pub caption: String,
}

/// Reference to another attraction by display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyAttraction {
    pub name: String,
    #[serde(default)]
    pub distance: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walking_time: Option<String>,
}

impl Attraction {
    /// Adult admission is zero
    pub fn is_free(&self) -> bool {
        self.visiting_information.admission_prices.is_free()
    }

    pub fn is_wheelchair_accessible(&self) -> bool {
        self.features.accessibility.wheelchair_accessible
    }

    pub fn is_ideal_for_cruise_passengers(&self) -> bool {
        self.cruise_passenger_info.ideal_for_cruise_passengers
    }

    /// Hours string of the first seasonal schedule entry, if any
    pub fn primary_hours(&self) -> Option<&str> {
        self.visiting_information
            .opening_times
            .seasonal
            .first()
            .map(|s| s.hours.as_str())
            .filter(|h| !h.trim().is_empty())
    }

    /// Validate field constraints that serde cannot express
    ///
    /// Runs the derived rules on the top-level fields, then the nested
    /// price and coordinate checks, collecting every failure.
    pub fn validate_fields(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(report) => ValidationErrors::from(report),
        };

        errors.check(validate_rating(self.rating, "rating"));

        let prices = &self.visiting_information.admission_prices;
        errors.check(validate_price(
            prices.adult,
            "visitingInformation.admissionPrices.adult",
        ));
        errors.check(validate_optional_price(
            prices.youth,
            "visitingInformation.admissionPrices.youth",
        ));
        errors.check(validate_optional_price(
            prices.child,
            "visitingInformation.admissionPrices.child",
        ));
        errors.check(validate_optional_price(
            prices.senior,
            "visitingInformation.admissionPrices.senior",
        ));
        errors.check(validate_optional_price(
            prices.family,
            "visitingInformation.admissionPrices.family",
        ));

        let coords = self.location.coordinates;
        if let Err(failures) = validate_coordinates(coords.latitude, coords.longitude) {
            for failure in failures {
                errors.add(failure);
            }
        }

        errors.into_result(())
    }

    /// Validate fields and check the id against the document's storage key
    pub fn validate_for_key(&self, storage_key: &str) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate_fields() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        errors.check(validate_storage_key(&self.id, storage_key));
        errors.into_result(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationErrorKind;
    use crate::test_utils::AttractionBuilder;
    use serde_json::json;

    fn minimal_document() -> serde_json::Value {
        json!({
            "id": "belem-tower",
            "name": "Belém Tower",
            "type": "monument",
            "categories": ["monument", "unesco-heritage"],
            "description": { "short": "Fortified tower on the Tagus." },
            "location": { "coordinates": { "latitude": 38.6916, "longitude": -9.2160 } },
            "visitingInformation": { "admissionPrices": { "adult": 8 } },
            "cruisePassengerInfo": { "idealForCruisePassengers": true },
            "features": { "accessibility": { "wheelchairAccessible": false } },
            "tags": ["historic", "riverside"],
            "rating": 4.5,
            "reviewCount": 51234
        })
    }

    #[test]
    fn test_minimal_document_deserializes() {
        let attraction: Attraction = serde_json::from_value(minimal_document()).unwrap();

        assert_eq!(attraction.id, "belem-tower");
        assert_eq!(attraction.kind, "monument");
        assert_eq!(attraction.categories, vec!["monument", "unesco-heritage"]);
        assert_eq!(attraction.visiting_information.admission_prices.adult, 8.0);
        assert!(attraction.tagline.is_empty());
        assert!(attraction.nearby_attractions.is_empty());
        assert!(attraction.is_ideal_for_cruise_passengers());
        assert!(!attraction.is_free());
        assert!(attraction.validate_fields().is_ok());
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut doc = minimal_document();
        doc.as_object_mut().unwrap().remove("rating");
        assert!(serde_json::from_value::<Attraction>(doc).is_err());

        let mut doc = minimal_document();
        doc["features"] = json!({ "highlights": ["view"] });
        assert!(serde_json::from_value::<Attraction>(doc).is_err());
    }

    #[test]
    fn test_negative_review_count_is_rejected() {
        let mut doc = minimal_document();
        doc["reviewCount"] = json!(-3);
        assert!(serde_json::from_value::<Attraction>(doc).is_err());
    }

    #[test]
    fn test_nested_keys_use_authored_names() {
        let mut doc = minimal_document();
        doc["location"]["address"] = json!({ "street": "Av. Brasília", "postal_code": "1400-038" });
        doc["nearbyAttractions"] = json!([
            { "name": "Jerónimos Monastery", "distance": "1 km", "type": "monument", "walkingTime": "12 min" }
        ]);

        let attraction: Attraction = serde_json::from_value(doc).unwrap();
        assert_eq!(attraction.location.address.postal_code, "1400-038");
        assert_eq!(attraction.nearby_attractions[0].kind, "monument");
        assert_eq!(
            attraction.nearby_attractions[0].walking_time.as_deref(),
            Some("12 min")
        );

        let value = serde_json::to_value(&attraction).unwrap();
        assert_eq!(value["type"], "monument");
        assert_eq!(value["location"]["address"]["postal_code"], "1400-038");
        assert_eq!(value["cruisePassengerInfo"]["idealForCruisePassengers"], true);
        assert_eq!(value["nearbyAttractions"][0]["walkingTime"], "12 min");
    }

    #[test]
    fn test_validate_fields_collects_every_failure() {
        let mut attraction = AttractionBuilder::new("alpha-museum", "Alpha Museum").build();
        attraction.rating = 7.5;
        attraction.visiting_information.admission_prices.adult = -1.0;
        attraction.location.coordinates.latitude = 120.0;

        let errors = attraction.validate_fields().unwrap_err();
        assert_eq!(errors.len(), 3);
        let rating = errors.errors().iter().find(|e| e.field == "rating").unwrap();
        assert_eq!(rating.kind, ValidationErrorKind::OutOfRange { min: 0.0, max: 5.0 });

        attraction.rating = f64::NAN;
        attraction.visiting_information.admission_prices.adult = 0.0;
        attraction.location.coordinates.latitude = 38.7;
        assert_eq!(attraction.validate_fields().unwrap_err().len(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_id_and_blank_name() {
        let attraction = AttractionBuilder::new("Alpha Museum", "   ").build();
        let errors = attraction.validate_fields().unwrap_err();
        assert!(errors
            .errors()
            .iter()
            .any(|e| e.field == "id" && e.kind == ValidationErrorKind::InvalidSlug));
        assert!(errors
            .errors()
            .iter()
            .any(|e| e.field == "name" && e.kind == ValidationErrorKind::RequiredField));
    }

    #[test]
    fn test_fractional_distance_from_port() {
        let mut doc = minimal_document();
        doc["location"]["distanceFromCruisePort"] =
            json!({ "meters": 1500.5, "walkingTime": "20 minutes" });

        let attraction: Attraction = serde_json::from_value(doc).unwrap();
        assert_eq!(attraction.location.distance_from_cruise_port.meters, 1500.5);
        assert!(attraction.validate_fields().is_ok());
    }

    #[test]
    fn test_validate_for_key() {
        let attraction = AttractionBuilder::new("alpha-museum", "Alpha Museum").build();
        assert!(attraction.validate_for_key("alpha-museum").is_ok());

        let errors = attraction.validate_for_key("alpha").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors()[0].field, "id");
    }

    #[test]
    fn test_primary_hours() {
        let mut attraction = AttractionBuilder::new("a", "Alpha").build();
        assert_eq!(attraction.primary_hours(), None);

        attraction.visiting_information.opening_times.seasonal = vec![
            SeasonalHours {
                season: "Summer".to_string(),
                hours: "10:00 - 18:30".to_string(),
                ..Default::default()
            },
            SeasonalHours {
                season: "Winter".to_string(),
                hours: "10:00 - 17:30".to_string(),
                ..Default::default()
            },
        ];
        assert_eq!(attraction.primary_hours(), Some("10:00 - 18:30"));
    }

    #[test]
    fn test_description_paragraphs() {
        let description = Description {
            short: "Short".to_string(),
            full: "First paragraph.\n\nSecond paragraph.\n\n\n".to_string(),
            history: None,
            significance: None,
        };
        let paragraphs: Vec<_> = description.paragraphs().collect();
        assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }
}
