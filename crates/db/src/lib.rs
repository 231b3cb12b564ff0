//! Data access for the `movies` collection.
//!
//! Handlers only ever see the [`MovieStore`] trait; the binary picks the
//! MongoDB-backed or the in-memory implementation at startup.

pub mod config;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod store;

pub use config::{StoreBackend, StoreConfig};
pub use memory::InMemoryMovieStore;
pub use mongo::MongoMovieStore;
pub use store::{MovieStore, StoreError};

/// Name of the collection holding movie documents.
pub const MOVIES_COLLECTION: &str = "movies";
