//! Health check handler

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{Json, extract::State, http::StatusCode};
use utoipa::ToSchema;

use super::super::response::{ApiResponse, error_codes};
use super::super::state::AppState;

/// Health check response data
#[derive(serde::Serialize, ToSchema)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    #[schema(example = 1703494800000_u64)]
    pub timestamp_ms: u64,
    /// Record store in use
    #[schema(example = "postgres")]
    pub backend: &'static str,
    #[schema(example = "0.1.0+a1b2c3d")]
    pub version: String,
}

/// Health check endpoint
///
/// Pings the record store. Failure details go to the log, never to the
/// response body.
///
/// - Healthy: 200 OK + {code: 0, data: {timestamp_ms, backend, version}}
/// - Unhealthy: 503 Service Unavailable + {code: 5001, msg: "unavailable"}
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service healthy", body = HealthResponse, content_type = "application/json"),
        (status = 503, description = "Service unavailable")
    ),
    tag = "System"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match state.repos.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(HealthResponse {
                timestamp_ms: now_ms,
                backend: state.repos.backend_name(),
                version: format!("{}+{}", env!("CARGO_PKG_VERSION"), env!("GIT_HASH")),
            })),
        ),
        Err(e) => {
            tracing::error!("[HEALTH] Record store ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    code: error_codes::SERVICE_UNAVAILABLE,
                    msg: "unavailable".to_string(),
                    data: None,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::state::tests::test_state;

    #[tokio::test]
    async fn test_health_reports_memory_backend() {
        let (state, _store) = test_state();
        let (status, Json(body)) = health_check(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.code, 0);
        let data = body.data.unwrap();
        assert_eq!(data.backend, "memory");
        assert!(data.version.starts_with(env!("CARGO_PKG_VERSION")));
    }
}
