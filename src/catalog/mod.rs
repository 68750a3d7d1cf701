//! Attraction catalog
//!
//! This module provides the read-only repository over the attraction
//! documents, the query functions it answers with, and the collation used to
//! order attractions by name.

pub mod collation;
pub mod json_repo;
pub mod query;
pub mod repository;

// Re-export commonly used types
pub use json_repo::{JsonDirectoryRepository, ScanOutcome, SkippedRecord};
pub use query::CatalogStats;
pub use repository::{AttractionRepository, RepositoryError, RepositoryResult};
