//! In-process [`MovieStore`] used by tests and by `STORE_BACKEND=memory`.

use async_trait::async_trait;
use indexmap::IndexMap;
use movies_core::types::DocumentId;
use tokio::sync::RwLock;

use crate::models::movie::Movie;
use crate::store::{MovieStore, StoreError};

/// Insertion-ordered map of movies guarded by an async read/write lock.
///
/// Nothing is persisted; contents live as long as the store does.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<IndexMap<DocumentId, Movie>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.movies.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Movie, StoreError> {
        self.movies
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn insert(&self, mut movie: Movie) -> Result<Movie, StoreError> {
        let id = DocumentId::generate();
        movie.id = Some(id);
        self.movies.write().await.insert(id, movie.clone());
        Ok(movie)
    }

    async fn update(&self, movie: &Movie) -> Result<(), StoreError> {
        let Some(id) = movie.id else {
            return Err(StoreError::not_found("(none)"));
        };
        let mut movies = self.movies.write().await;
        match movies.get_mut(&id) {
            Some(stored) => {
                *stored = movie.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(id)),
        }
    }

    async fn delete(&self, id: DocumentId) -> Result<(), StoreError> {
        self.movies
            .write()
            .await
            .shift_remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
