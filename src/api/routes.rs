//! Short URL API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL management routes.
///
/// # Endpoints
///
/// - `POST /shorturls`               - Create a short URL
/// - `GET  /shorturls/{code}/stats`  - Click statistics for a short URL
pub fn short_url_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturls", post(shorten_handler))
        .route("/shorturls/{code}/stats", get(stats_handler))
}
