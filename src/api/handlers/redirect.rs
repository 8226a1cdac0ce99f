//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// Every served redirect records one click. The `Referer` header becomes the
/// click source, decoded lossily when it is not plain ASCII; requests without
/// one are recorded as `direct`.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the short code has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let referrer = headers
        .get(header::REFERER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()));

    let target = state
        .short_url_service
        .resolve(&code, referrer.as_deref())
        .await?;

    Ok(Redirect::temporary(&target))
}
