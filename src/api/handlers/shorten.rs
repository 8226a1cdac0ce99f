//! Handler for the short URL creation endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::dto::shorten::{CreateShortUrlRequest, CreateShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `package` attached to log events for requests rejected before the service.
const LOG_PACKAGE: &str = "handler";

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "validity": 30,          // optional, minutes
///   "shortcode": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortcode": "my-link",
///   "originalUrl": "https://example.com",
///   "createdAt": 1767225600000,
///   "expiresAt": 1767227400000,
///   "shortUrl": "http://localhost:5000/my-link"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, invalid URL, shortcode, or validity.
/// Requests rejected here, before reaching the service, still emit an
/// `error` log event.
/// Returns 409 Conflict if the shortcode is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateShortUrlResponse>), AppError> {
    let service = &state.short_url_service;
    let logger = service.logger();

    let Json(body) = payload.inspect_err(|rejection| {
        logger.error(
            LOG_PACKAGE,
            format!("Malformed request body: {}", rejection.body_text()),
        );
    })?;

    if !body.get("url").is_some_and(Value::is_string) {
        logger.error(LOG_PACKAGE, "Invalid URL input");
        return Err(AppError::bad_request(
            "Invalid URL",
            json!({ "reason": "url must be a string" }),
        ));
    }

    let payload: CreateShortUrlRequest = serde_json::from_value(body).map_err(|e| {
        logger.error(LOG_PACKAGE, format!("Malformed request body: {}", e));
        AppError::bad_request("Malformed request body", json!({ "reason": e.to_string() }))
    })?;

    payload
        .validate()
        .inspect_err(|_| logger.error(LOG_PACKAGE, "Invalid URL input"))?;

    let record = service.create(payload.into()).await?;
    let short_url = service.short_url(&record.code);

    Ok((
        StatusCode::CREATED,
        Json(CreateShortUrlResponse::new(record, short_url)),
    ))
}
