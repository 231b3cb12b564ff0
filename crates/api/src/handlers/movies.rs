//! Handlers for the `/movies` resource.
//!
//! Each handler decodes at most one body, makes at most one store call and
//! writes exactly one response through [`json_response`].

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use movies_core::types::DocumentId;
use movies_db::models::movie::Movie;

use crate::error::{AppError, AppResult};
use crate::response::{json_response, ResultResponse};
use crate::state::AppState;

pub const INVALID_MOVIE_ID: &str = "Invalid Movie ID";
pub const INVALID_CREATE_PAYLOAD: &str = "Invalid request payload";
pub const INVALID_CHANGE_PAYLOAD: &str = "Invalid payload request";

/// GET /movies
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Response> {
    let movies = state.store.find_all().await?;

    Ok(json_response(StatusCode::OK, &movies))
}

/// GET /movies/{id}
///
/// Malformed and unknown identifiers are indistinguishable to the client:
/// both are a 400 with "Invalid Movie ID".
pub async fn get_movie(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Response> {
    let id: DocumentId = raw_id.parse().map_err(|e| {
        tracing::debug!(error = %e, "Rejected movie id");
        AppError::BadRequest(INVALID_MOVIE_ID.into())
    })?;

    let movie = state.store.find_by_id(id).await.map_err(|e| {
        if e.is_not_found() {
            tracing::debug!(movie_id = %id, "Movie not found");
            AppError::BadRequest(INVALID_MOVIE_ID.into())
        } else {
            AppError::Store(e)
        }
    })?;

    Ok(json_response(StatusCode::OK, &movie))
}

/// POST /movies
///
/// The store assigns the identifier; any `id` in the payload is ignored.
pub async fn create_movie(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    let input = decode_movie(&body, INVALID_CREATE_PAYLOAD)?;

    let movie = state.store.insert(input).await?;

    if let Some(id) = movie.id {
        tracing::info!(movie_id = %id, title = %movie.title, "Movie created");
    }

    Ok(json_response(StatusCode::CREATED, &movie))
}

/// PUT /movies
///
/// Full replacement of the record named by the payload's `id`.
pub async fn update_movie(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    let movie = decode_movie(&body, INVALID_CHANGE_PAYLOAD)?;
    let id = require_id(&movie)?;

    state.store.update(&movie).await?;

    tracing::info!(movie_id = %id, "Movie updated");

    Ok(json_response(StatusCode::OK, &ResultResponse::success()))
}

/// DELETE /movies
///
/// Only the payload's `id` is used to pick the record.
pub async fn delete_movie(State(state): State<AppState>, body: Bytes) -> AppResult<Response> {
    let movie = decode_movie(&body, INVALID_CHANGE_PAYLOAD)?;
    let id = require_id(&movie)?;

    state.store.delete(id).await?;

    tracing::info!(movie_id = %id, "Movie deleted");

    Ok(json_response(StatusCode::OK, &ResultResponse::success()))
}

/// Decode a request body as a [`Movie`], regardless of its content type.
///
/// Only a JSON object is a movie; serde would otherwise also accept a
/// positional array for the struct.
fn decode_movie(body: &Bytes, message: &'static str) -> AppResult<Movie> {
    let reject = |reason: &dyn std::fmt::Display| {
        tracing::debug!(error = %reason, "Rejected movie payload");
        AppError::BadRequest(message.into())
    };

    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| reject(&e))?;
    if !value.is_object() {
        return Err(reject(&"payload is not a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| reject(&e))
}

fn require_id(movie: &Movie) -> AppResult<DocumentId> {
    movie.id.ok_or_else(|| {
        tracing::debug!("Movie payload has no id");
        AppError::BadRequest(INVALID_CHANGE_PAYLOAD.into())
    })
}
