#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use movies_core::types::DocumentId;
use movies_db::models::movie::Movie;
use movies_db::{InMemoryMovieStore, MovieStore, StoreBackend, StoreConfig, StoreError};
use tower::ServiceExt;

use movies_api::config::{LogFormat, ServerConfig};
use movies_api::router::build_app_router;
use movies_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
        store: StoreConfig {
            backend: StoreBackend::Memory,
            uri: String::new(),
            database: "movies_test".to_string(),
        },
    }
}

/// Build the full application router over `store`.
pub fn build_test_app(store: Arc<dyn MovieStore>) -> Router {
    build_test_app_with_config(store, test_config())
}

pub fn build_test_app_with_config(store: Arc<dyn MovieStore>, config: ServerConfig) -> Router {
    build_app_router(AppState {
        store,
        config: Arc::new(config),
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&json.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(&json.to_string())).await
}

pub async fn delete_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(&json.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Test stores
// ---------------------------------------------------------------------------

/// Wraps an [`InMemoryMovieStore`] and counts every call that reaches it.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryMovieStore,
    calls: AtomicUsize,
}

impl RecordingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MovieStore for RecordingStore {
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        self.record();
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Movie, StoreError> {
        self.record();
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, movie: Movie) -> Result<Movie, StoreError> {
        self.record();
        self.inner.insert(movie).await
    }

    async fn update(&self, movie: &Movie) -> Result<(), StoreError> {
        self.record();
        self.inner.update(movie).await
    }

    async fn delete(&self, id: DocumentId) -> Result<(), StoreError> {
        self.record();
        self.inner.delete(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.record();
        self.inner.ping().await
    }
}

/// A store whose backend is always down.
pub struct FailingStore;

pub const FAILURE_MESSAGE: &str = "connection refused by movies backend";

fn backend_down() -> StoreError {
    StoreError::Backend(FAILURE_MESSAGE.into())
}

#[async_trait]
impl MovieStore for FailingStore {
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        Err(backend_down())
    }

    async fn find_by_id(&self, _id: DocumentId) -> Result<Movie, StoreError> {
        Err(backend_down())
    }

    async fn insert(&self, _movie: Movie) -> Result<Movie, StoreError> {
        Err(backend_down())
    }

    async fn update(&self, _movie: &Movie) -> Result<(), StoreError> {
        Err(backend_down())
    }

    async fn delete(&self, _id: DocumentId) -> Result<(), StoreError> {
        Err(backend_down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(backend_down())
    }
}

/// How a [`MisbehavingStore`] handles every call.
#[derive(Clone, Copy)]
pub enum Misbehavior {
    /// Never answer within any reasonable request timeout.
    Stall,
    /// Panic inside the handler.
    Panic,
}

pub struct MisbehavingStore(pub Misbehavior);

impl MisbehavingStore {
    async fn act<T: Send>(&self) -> Result<T, StoreError> {
        match self.0 {
            Misbehavior::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(backend_down())
            }
            Misbehavior::Panic => panic!("movie store exploded"),
        }
    }
}

#[async_trait]
impl MovieStore for MisbehavingStore {
    async fn find_all(&self) -> Result<Vec<Movie>, StoreError> {
        self.act().await
    }

    async fn find_by_id(&self, _id: DocumentId) -> Result<Movie, StoreError> {
        self.act().await
    }

    async fn insert(&self, _movie: Movie) -> Result<Movie, StoreError> {
        self.act().await
    }

    async fn update(&self, _movie: &Movie) -> Result<(), StoreError> {
        self.act().await
    }

    async fn delete(&self, _id: DocumentId) -> Result<(), StoreError> {
        self.act().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.act().await
    }
}
