//! Handler for short URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves statistics for a short URL.
///
/// # Endpoint
///
/// `GET /shorturls/{code}/stats`
///
/// # Response
///
/// ```json
/// {
///   "shortcode": "abc123",
///   "originalUrl": "https://example.com",
///   "createdAt": 1767225600000,
///   "expiresAt": 1767227400000,
///   "totalClicks": 1,
///   "clicks": [
///     { "timestamp": 1767225660000, "source": "direct", "location": "unknown" }
///   ]
/// }
/// ```
///
/// Expired codes still report their history.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.short_url_service.stats(&code).await?;

    Ok(Json(stats.into()))
}
