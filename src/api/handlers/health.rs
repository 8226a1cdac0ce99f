//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Reports the number of stored short URLs
/// 2. **Log Queue**: Checks the log worker is still receiving and reports free capacity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "12 short URLs" },
///     "log_queue": { "status": "ok", "message": "Capacity: 9998/10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let queue_check = check_log_queue(&state);

    let all_healthy = store_check.is_ok() && queue_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            log_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    let count = state.short_url_service.count().await;
    CheckStatus::ok(format!("{} short URLs", count))
}

/// Checks if the log delivery queue is operational.
fn check_log_queue(state: &AppState) -> CheckStatus {
    let logger = state.short_url_service.logger();

    if logger.is_closed() {
        CheckStatus::error("Log queue is closed")
    } else {
        CheckStatus::ok(format!(
            "Capacity: {}/{}",
            logger.capacity(),
            logger.max_capacity()
        ))
    }
}
