//! Test utilities for shoreguide
//!
//! Builders for valid attraction records, an in-memory repository, and
//! helpers to lay out fixture documents on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::catalog::{query, AttractionRepository, RepositoryError, RepositoryResult};
use crate::models::{
    Accessibility, AdmissionPrices, Attraction, Coordinates, CruisePassengerInfo, Description,
    Features, Location, NearbyAttraction, VisitingInformation,
};

/// In-memory implementation of AttractionRepository for testing
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttractionRepository {
    attractions: Arc<Mutex<Vec<Attraction>>>,
    fail_next: Arc<Mutex<Option<String>>>,
}

impl InMemoryAttractionRepository {
    /// Create a repository holding `attractions`
    pub fn new(attractions: Vec<Attraction>) -> Self {
        Self {
            attractions: Arc::new(Mutex::new(attractions)),
            fail_next: Arc::new(Mutex::new(None)),
        }
    }

    /// Configure the repository to fail the next operation
    pub fn fail_next_operation(&self, error_message: &str) {
        *self.fail_next.lock().unwrap() = Some(error_message.to_string());
    }

    /// Add an attraction
    pub fn add(&self, attraction: Attraction) {
        self.attractions.lock().unwrap().push(attraction);
    }

    fn check_failure(&self) -> RepositoryResult<()> {
        match self.fail_next.lock().unwrap().take() {
            Some(message) => Err(RepositoryError::StorageUnavailable {
                path: "memory".to_string(),
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AttractionRepository for InMemoryAttractionRepository {
    async fn load_all(&self) -> RepositoryResult<Vec<Attraction>> {
        self.check_failure()?;
        let mut all = self.attractions.lock().unwrap().clone();
        query::sort_by_name(&mut all);
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Attraction>> {
        self.check_failure()?;
        let attractions = self.attractions.lock().unwrap();
        Ok(attractions.iter().find(|a| a.id == id).cloned())
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        self.check_failure()
    }
}

/// Builder for valid attraction records
///
/// Defaults: rating 4.0, adult price 10, not ideal for cruise passengers,
/// not wheelchair accessible, no categories, tags or nearby references.
pub struct AttractionBuilder {
    attraction: Attraction,
}

impl AttractionBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            attraction: Attraction {
                id: id.to_string(),
                name: name.to_string(),
                tagline: String::new(),
                kind: "landmark".to_string(),
                categories: Vec::new(),
                description: Description {
                    short: format!("About {}", name),
                    ..Default::default()
                },
                location: Location {
                    address: Default::default(),
                    coordinates: Coordinates {
                        latitude: 38.7223,
                        longitude: -9.1393,
                    },
                    directions: Default::default(),
                    distance_from_cruise_port: Default::default(),
                },
                contact: Default::default(),
                visiting_information: VisitingInformation {
                    opening_times: Default::default(),
                    admission_prices: AdmissionPrices {
                        currency: "EUR".to_string(),
                        adult: 10.0,
                        youth: None,
                        child: None,
                        senior: None,
                        family: None,
                        lisboa_card_free: None,
                        combo_ticket: None,
                        notes: String::new(),
                    },
                    average_visit_duration: String::new(),
                    best_time_to_visit: String::new(),
                    busy_periods: Vec::new(),
                    advice_for_visitors: String::new(),
                },
                cruise_passenger_info: CruisePassengerInfo {
                    ideal_for_cruise_passengers: false,
                    time_needed_from_port: String::new(),
                    accessibility: String::new(),
                    combinable_with: Vec::new(),
                    tips: Vec::new(),
                },
                features: Features {
                    highlights: Vec::new(),
                    facilities: Vec::new(),
                    accessibility: Accessibility {
                        wheelchair_accessible: false,
                        mobility_notes: String::new(),
                        visual_aid_services: false,
                        hearing_aid_services: false,
                    },
                    languages: Vec::new(),
                },
                images: Default::default(),
                nearby_attractions: Vec::new(),
                tags: Vec::new(),
                suitable_for: Vec::new(),
                weather_dependent: false,
                indoor_activities: false,
                outdoor_activities: false,
                price_range: "$".to_string(),
                rating: 4.0,
                review_count: 100,
                review_source: String::new(),
            },
        }
    }

    /// Primary type
    pub fn kind(mut self, kind: &str) -> Self {
        self.attraction.kind = kind.to_string();
        self
    }

    pub fn tagline(mut self, tagline: &str) -> Self {
        self.attraction.tagline = tagline.to_string();
        self
    }

    pub fn short_description(mut self, short: &str) -> Self {
        self.attraction.description.short = short.to_string();
        self
    }

    pub fn categories(mut self, categories: &[&str]) -> Self {
        self.attraction.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.attraction.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.attraction.rating = rating;
        self
    }

    pub fn adult_price(mut self, price: f64) -> Self {
        self.attraction.visiting_information.admission_prices.adult = price;
        self
    }

    /// Free adult admission
    pub fn free(self) -> Self {
        self.adult_price(0.0)
    }

    pub fn ideal_for_cruise_passengers(mut self, ideal: bool) -> Self {
        self.attraction.cruise_passenger_info.ideal_for_cruise_passengers = ideal;
        self
    }

    pub fn wheelchair_accessible(mut self, accessible: bool) -> Self {
        self.attraction.features.accessibility.wheelchair_accessible = accessible;
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.attraction.location.coordinates = Coordinates {
            latitude,
            longitude,
        };
        self
    }

    /// Nearby references by display name
    pub fn nearby(mut self, names: &[&str]) -> Self {
        self.attraction.nearby_attractions = names
            .iter()
            .map(|name| NearbyAttraction {
                name: name.to_string(),
                distance: "500m".to_string(),
                kind: "landmark".to_string(),
                walking_time: None,
            })
            .collect();
        self
    }

    pub fn price_range(mut self, price_range: &str) -> Self {
        self.attraction.price_range = price_range.to_string();
        self
    }

    pub fn build(self) -> Attraction {
        self.attraction
    }
}

/// Write `attraction` to `<dir>/<id>.json`
pub fn write_attraction(dir: &Path, attraction: &Attraction) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("{}.json", attraction.id));
    let body = serde_json::to_vec_pretty(attraction)?;
    std::fs::write(&path, body)?;
    Ok(path)
}

/// Write a raw document body to `<dir>/<file_name>`
pub fn write_raw_document(dir: &Path, file_name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_produces_valid_record() {
        let attraction = AttractionBuilder::new("alpha-museum", "Alpha Museum")
            .categories(&["museum"])
            .free()
            .build();

        assert!(attraction.validate_for_key("alpha-museum").is_ok());
        assert!(attraction.is_free());
    }

    #[tokio::test]
    async fn test_in_memory_repository() {
        let repo = InMemoryAttractionRepository::new(vec![
            AttractionBuilder::new("b", "Beta").build(),
        ]);
        repo.add(AttractionBuilder::new("a", "Alpha").build());

        let all = repo.load_all().await.unwrap();
        assert_eq!(all[0].id, "a");
        assert!(repo.find_by_id("b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_in_memory_repository_failure() {
        let repo = InMemoryAttractionRepository::default();

        repo.fail_next_operation("disk gone");
        assert!(repo.health_check().await.is_err());
        assert!(repo.health_check().await.is_ok());
    }
}
