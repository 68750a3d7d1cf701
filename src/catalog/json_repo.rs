//! JSON directory implementation of the attraction repository
//!
//! Each attraction lives in its own `<id>.json` document inside one
//! directory. Every call rescans the directory, so edits made by the offline
//! content process are visible on the next query without invalidation.

use async_trait::async_trait;
use futures::future::join_all;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::Instrument;

use crate::{
    catalog::{
        query,
        repository::{AttractionRepository, RepositoryError, RepositoryResult},
    },
    logging::Timer,
    models::{is_slug, Attraction},
};

/// File extension of attraction documents
pub const DOCUMENT_EXTENSION: &str = "json";

/// A document that was left out of the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// File name within the data directory
    pub file: String,
    /// Why the document was rejected
    pub reason: String,
}

/// Result of scanning the data directory
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Valid attractions, sorted by name
    pub attractions: Vec<Attraction>,
    /// Documents that failed to read, parse or validate, in file-name order
    pub skipped: Vec<SkippedRecord>,
}

/// Repository over a directory of per-attraction JSON documents
#[derive(Debug, Clone)]
pub struct JsonDirectoryRepository {
    root: PathBuf,
}

impl JsonDirectoryRepository {
    /// Create a repository over `root` without touching the filesystem
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a repository, failing if `root` is not a readable directory
    pub async fn open(root: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let repo = Self::new(root);
        repo.health_check().await?;
        tracing::info!(root = %repo.root.display(), "Attraction catalog opened");
        Ok(repo)
    }

    /// The data directory this repository reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.{}", id, DOCUMENT_EXTENSION))
    }

    fn storage_unavailable(&self, err: std::io::Error) -> RepositoryError {
        RepositoryError::StorageUnavailable {
            path: self.root.display().to_string(),
            message: err.to_string(),
        }
    }

    /// List `(storage key, path)` for every JSON document, ordered by file name
    ///
    /// Symlinks are followed. An entry whose metadata cannot be read is
    /// returned as skipped instead of failing the listing.
    async fn list_documents(
        &self,
    ) -> RepositoryResult<(Vec<(String, PathBuf)>, Vec<SkippedRecord>)> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| self.storage_unavailable(e))?;

        let mut documents = Vec::new();
        let mut skipped = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    // The iterator may keep failing on the same entry
                    skipped.push(SkippedRecord {
                        file: file_name(&self.root),
                        reason: format!("directory listing stopped early: {}", e),
                    });
                    break;
                },
            };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            match tokio::fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => {},
                Ok(_) => continue,
                Err(e) => {
                    skipped.push(SkippedRecord {
                        file: file_name(&path),
                        reason: e.to_string(),
                    });
                    continue;
                },
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => documents.push((stem.to_string(), path.clone())),
                None => tracing::warn!(file = %path.display(), "Ignoring document with non-UTF-8 name"),
            }
        }

        documents.sort_by(|a, b| a.1.cmp(&b.1));
        Ok((documents, skipped))
    }

    /// Read, parse and validate every document in the directory
    ///
    /// Documents are read concurrently. A document that fails any step is
    /// recorded in [`ScanOutcome::skipped`]; only a missing or unreadable
    /// directory fails the scan.
    pub async fn scan(&self) -> RepositoryResult<ScanOutcome> {
        let (documents, unlisted) = self.list_documents().await?;

        let results = join_all(
            documents
                .iter()
                .map(|(key, path)| async move { (path, read_document(path, key).await) }),
        )
        .await;

        let mut outcome = ScanOutcome {
            skipped: unlisted,
            ..ScanOutcome::default()
        };
        for (path, result) in results {
            match result {
                Ok(attraction) => outcome.attractions.push(attraction),
                Err(e) => outcome.skipped.push(SkippedRecord {
                    file: file_name(path),
                    reason: e.to_string(),
                }),
            }
        }

        query::sort_by_name(&mut outcome.attractions);
        outcome.skipped.sort_by(|a, b| a.file.cmp(&b.file));
        Ok(outcome)
    }
}

/// Read one document and check it belongs under `key`
async fn read_document(path: &Path, key: &str) -> RepositoryResult<Attraction> {
    let bytes = tokio::fs::read(path).await?;
    parse_document(&bytes, key)
}

/// Parse and validate raw document bytes stored under `key`
pub fn parse_document(bytes: &[u8], key: &str) -> RepositoryResult<Attraction> {
    let attraction: Attraction =
        serde_json::from_slice(bytes).map_err(|e| RepositoryError::Parse {
            key: key.to_string(),
            message: e.to_string(),
        })?;

    attraction
        .validate_for_key(key)
        .map_err(|e| RepositoryError::Validation {
            key: key.to_string(),
            message: e.to_string(),
        })?;

    Ok(attraction)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[async_trait]
impl AttractionRepository for JsonDirectoryRepository {
    async fn load_all(&self) -> RepositoryResult<Vec<Attraction>> {
        let span = crate::catalog_span!("load_all");
        async {
            let timer = Timer::start("catalog.load_all");
            let outcome = self.scan().await?;

            for skipped in &outcome.skipped {
                tracing::warn!(
                    file = %skipped.file,
                    error = %skipped.reason,
                    "Skipping attraction document"
                );
            }

            let current = tracing::Span::current();
            current.record("loaded", outcome.attractions.len());
            current.record("skipped", outcome.skipped.len());
            tracing::debug!(
                loaded = outcome.attractions.len(),
                skipped = outcome.skipped.len(),
                "Attraction catalog loaded"
            );
            timer.stop();

            Ok::<_, RepositoryError>(outcome.attractions)
        }
        .instrument(span)
        .await
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Attraction>> {
        if !is_slug(id) {
            return Ok(None);
        }

        let path = self.document_path(id);
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {},
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!(id = id, error = %e, "Attraction document is unreadable");
                return Ok(None);
            },
        }

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                tracing::warn!(id = id, error = %e, "Attraction document is unreadable");
                return Ok(None);
            },
        };

        match parse_document(&bytes, id) {
            Ok(attraction) => Ok(Some(attraction)),
            Err(e) => {
                tracing::warn!(id = id, error = %e, "Attraction document is unusable");
                Ok(None)
            },
        }
    }

    async fn health_check(&self) -> RepositoryResult<()> {
        let metadata = tokio::fs::metadata(&self.root)
            .await
            .map_err(|e| self.storage_unavailable(e))?;

        if metadata.is_dir() {
            Ok(())
        } else {
            Err(RepositoryError::StorageUnavailable {
                path: self.root.display().to_string(),
                message: "not a directory".to_string(),
            })
        }
    }
}
