pub mod health;
pub mod movies;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /movies          list (GET), create (POST), update (PUT), delete (DELETE)
/// /movies/{id}     get by id (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(movies::router())
}
