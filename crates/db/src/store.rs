//! The data-access contract every movie backend implements.

use async_trait::async_trait;
use movies_core::error::CoreError;
use movies_core::types::DocumentId;

use crate::models::movie::Movie;

/// Errors returned by [`MovieStore`] operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A domain-level failure (currently: the record does not exist).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any driver or I/O failure talking to the backend.
    #[error("{0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn not_found(id: impl ToString) -> Self {
        Self::Core(CoreError::NotFound {
            entity: "Movie",
            id: id.to_string(),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Operations over the single `movies` collection.
///
/// Identifiers are typed: a string that is not a valid [`DocumentId`] is
/// rejected while parsing and can never reach an implementation.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Every stored movie, in storage order. An empty collection is `Ok(vec![])`.
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError>;

    /// The movie stored under `id`, or a `NotFound` error.
    async fn find_by_id(&self, id: DocumentId) -> Result<Movie, StoreError>;

    /// Assign a fresh identifier to `movie` and persist it.
    ///
    /// Any identifier already present on `movie` is discarded. Returns the
    /// movie as stored.
    async fn insert(&self, movie: Movie) -> Result<Movie, StoreError>;

    /// Replace the whole record whose identifier equals `movie.id`.
    ///
    /// A movie without an identifier cannot match anything and fails with
    /// `NotFound`, as does an identifier with no stored record.
    async fn update(&self, movie: &Movie) -> Result<(), StoreError>;

    /// Remove the record stored under `id`.
    async fn delete(&self, id: DocumentId) -> Result<(), StoreError>;

    /// Round-trip to the backend to check it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
