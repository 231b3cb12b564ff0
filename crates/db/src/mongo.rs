//! MongoDB-backed [`MovieStore`].

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use movies_core::types::DocumentId;

use crate::config::StoreConfig;
use crate::models::movie::{Movie, MovieDocument};
use crate::store::{MovieStore, StoreError};
use crate::MOVIES_COLLECTION;

/// Movie store over one MongoDB collection.
///
/// Holds the process-wide [`Client`]; the driver pools connections
/// internally, so a single instance is shared by every request.
#[derive(Debug, Clone)]
pub struct MongoMovieStore {
    client: Client,
    database: Database,
    movies: Collection<MovieDocument>,
}

impl MongoMovieStore {
    /// Connect using `config.uri` and select `config.database`.
    ///
    /// The driver connects lazily; call [`MovieStore::ping`] to verify the
    /// server is actually reachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        tracing::debug!(database = %config.database, "MongoDB client created");
        Ok(Self::from_client(client, &config.database))
    }

    pub fn from_client(client: Client, database: &str) -> Self {
        let database = client.database(database);
        let movies = database.collection::<MovieDocument>(MOVIES_COLLECTION);
        Self {
            client,
            database,
            movies,
        }
    }

    /// Close the client, waiting for in-flight operations to finish.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}

#[async_trait]
impl MovieStore for MongoMovieStore {
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        let docs: Vec<MovieDocument> = self.movies.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(Movie::from).collect())
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Movie, StoreError> {
        self.movies
            .find_one(doc! { "_id": id.object_id() })
            .await?
            .map(Movie::from)
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn insert(&self, mut movie: Movie) -> Result<Movie, StoreError> {
        let id = DocumentId::generate();
        self.movies
            .insert_one(MovieDocument::with_id(id, &movie))
            .await?;
        movie.id = Some(id);
        Ok(movie)
    }

    async fn update(&self, movie: &Movie) -> Result<(), StoreError> {
        let Some(id) = movie.id else {
            return Err(StoreError::not_found("(none)"));
        };
        let result = self
            .movies
            .replace_one(doc! { "_id": id.object_id() }, MovieDocument::with_id(id, movie))
            .await?;
        if result.matched_count == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }

    async fn delete(&self, id: DocumentId) -> Result<(), StoreError> {
        let result = self
            .movies
            .delete_one(doc! { "_id": id.object_id() })
            .await?;
        if result.deleted_count == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
