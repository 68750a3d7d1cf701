//! Repository abstraction for the attraction catalog
//!
//! An [`AttractionRepository`] backend supplies two primitives: load the
//! whole collection and fetch one record by id. Every catalog query is a
//! provided method built on those two and the pure functions in
//! [`super::query`], so each backend answers them identically.

use async_trait::async_trait;
use thiserror::Error;

use super::query::{self, CatalogStats};
use crate::models::Attraction;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The storage location itself is missing or unreadable
    #[error("Catalog storage unavailable at {path}: {message}")]
    StorageUnavailable { path: String, message: String },

    /// IO error while reading storage
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A single document is not valid JSON or does not fit the schema
    #[error("Failed to parse {key}: {message}")]
    Parse { key: String, message: String },

    /// A single document parsed but violates a field constraint
    #[error("Invalid record {key}: {message}")]
    Validation { key: String, message: String },
}

impl RepositoryError {
    /// Whether the error concerns one record rather than the whole store
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            RepositoryError::Parse { .. } | RepositoryError::Validation { .. }
        )
    }
}

/// Convert repository errors to application errors
impl From<RepositoryError> for crate::error::Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Io(e) => crate::error::Error::Io(e),
            _ => crate::error::Error::catalog(err.to_string()),
        }
    }
}

/// Read-only access to the attraction collection
#[async_trait]
pub trait AttractionRepository: Send + Sync {
    /// Every valid attraction, sorted by name under locale collation
    ///
    /// Records that fail to parse or validate are skipped, never fatal.
    async fn load_all(&self) -> RepositoryResult<Vec<Attraction>>;

    /// The attraction stored under exactly `id`, or `None`
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Attraction>>;

    /// Health check for the backing store
    async fn health_check(&self) -> RepositoryResult<()>;

    async fn list_categories(&self) -> RepositoryResult<Vec<String>> {
        Ok(query::categories(&self.load_all().await?))
    }

    async fn list_tags(&self) -> RepositoryResult<Vec<String>> {
        Ok(query::tags(&self.load_all().await?))
    }

    async fn list_types(&self) -> RepositoryResult<Vec<String>> {
        Ok(query::types(&self.load_all().await?))
    }

    async fn find_by_category(&self, category: &str) -> RepositoryResult<Vec<Attraction>> {
        Ok(query::filter_by_category(self.load_all().await?, category))
    }

    async fn find_by_tag(&self, tag: &str) -> RepositoryResult<Vec<Attraction>> {
        Ok(query::filter_by_tag(self.load_all().await?, tag))
    }

    async fn find_by_type(&self, kind: &str) -> RepositoryResult<Vec<Attraction>> {
        Ok(query::filter_by_type(self.load_all().await?, kind))
    }

    /// Free-text search; an empty query yields an empty list
    async fn search(&self, text: &str) -> RepositoryResult<Vec<Attraction>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(query::search(self.load_all().await?, text))
    }

    /// Up to `limit` cruise-friendly attractions, best rated first
    async fn featured(&self, limit: usize) -> RepositoryResult<Vec<Attraction>> {
        Ok(query::featured(self.load_all().await?, limit))
    }

    /// Up to `limit` resolvable nearby attractions of `id`
    ///
    /// An unknown `id` yields an empty list.
    async fn nearby(&self, id: &str, limit: usize) -> RepositoryResult<Vec<Attraction>> {
        let Some(target) = self.find_by_id(id).await? else {
            return Ok(Vec::new());
        };
        Ok(query::nearby(&target, self.load_all().await?, limit))
    }

    async fn stats(&self) -> RepositoryResult<CatalogStats> {
        Ok(query::stats(&self.load_all().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{AttractionBuilder, InMemoryAttractionRepository};

    fn repo() -> InMemoryAttractionRepository {
        InMemoryAttractionRepository::new(vec![
            AttractionBuilder::new("c", "Gamma Tower")
                .categories(&["monument"])
                .rating(3.0)
                .build(),
            AttractionBuilder::new("a", "Alpha Museum")
                .categories(&["museum"])
                .rating(4.5)
                .ideal_for_cruise_passengers(true)
                .nearby(&["Beta Park", "Gamma Tower", "Delta Gardens"])
                .build(),
            AttractionBuilder::new("b", "Beta Park")
                .categories(&["park"])
                .rating(4.9)
                .ideal_for_cruise_passengers(true)
                .build(),
        ])
    }

    fn names(attractions: &[Attraction]) -> Vec<&str> {
        attractions.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_repository_error_record_level() {
        assert!(RepositoryError::Parse {
            key: "a".to_string(),
            message: "eof".to_string()
        }
        .is_record_level());
        assert!(!RepositoryError::StorageUnavailable {
            path: "/data".to_string(),
            message: "missing".to_string()
        }
        .is_record_level());
    }

    #[test]
    fn test_repository_error_maps_to_application_error() {
        let err: crate::error::Error = RepositoryError::StorageUnavailable {
            path: "/data".to_string(),
            message: "missing".to_string(),
        }
        .into();
        assert!(matches!(err, crate::error::Error::Catalog(_)));
    }

    #[tokio::test]
    async fn test_provided_queries() {
        let repo = repo();

        assert_eq!(
            names(&repo.load_all().await.unwrap()),
            vec!["Alpha Museum", "Beta Park", "Gamma Tower"]
        );
        assert_eq!(
            names(&repo.featured(2).await.unwrap()),
            vec!["Beta Park", "Alpha Museum"]
        );
        assert_eq!(
            names(&repo.find_by_category("museum").await.unwrap()),
            vec!["Alpha Museum"]
        );
        assert_eq!(names(&repo.search("park").await.unwrap()), vec!["Beta Park"]);
        assert!(repo.search("").await.unwrap().is_empty());
        assert!(repo.find_by_id("z").await.unwrap().is_none());
        assert_eq!(
            repo.list_categories().await.unwrap(),
            vec!["monument", "museum", "park"]
        );
    }

    #[tokio::test]
    async fn test_nearby_resolution_by_slug() {
        let repo = InMemoryAttractionRepository::new(vec![
            AttractionBuilder::new("alpha-museum", "Alpha Museum")
                .nearby(&["Beta Park", "Alpha Museum", "Delta Gardens"])
                .build(),
            AttractionBuilder::new("beta-park", "Beta Park").build(),
            AttractionBuilder::new("gamma-tower", "Gamma Tower").build(),
        ]);

        assert_eq!(
            names(&repo.nearby("alpha-museum", 4).await.unwrap()),
            vec!["Beta Park"]
        );
        assert!(repo.nearby("missing", 4).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_nearby_unresolvable_names_are_dropped() {
        // Ids "b"/"c" are not the slugs of "Beta Park"/"Gamma Tower"
        let repo = repo();
        assert!(repo.nearby("a", 4).await.unwrap().is_empty());
    }
}
