//! Response envelope and screen outcomes
//!
//! - `ApiResponse<T>`: unified JSON wrapper
//! - `error_codes`: numeric error codes
//! - `Page<V>`: a handler's outcome, either a rendered screen or a redirect

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use super::flash::FlashMessage;
use crate::dashboard::DashboardError;

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: payload (success) or absent (error)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = 0)]
    pub code: i32,
    #[schema(example = "ok")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INVALID_FORM: i32 = 1002;

    // Auth errors (2xxx)
    pub const PERMISSION_DENIED: i32 = 2003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

// ============================================================================
// Screen outcomes
// ============================================================================

/// A rendered screen: template name, typed view-model, and the flash
/// messages being shown with it
#[derive(Debug, Serialize)]
pub struct Rendered<V> {
    pub template: &'static str,
    pub view: V,
    pub messages: Vec<FlashMessage>,
}

#[derive(Debug)]
pub enum Page<V> {
    Render(Rendered<V>),
    /// 303 See Other to the given path
    Redirect(String),
}

impl<V> Page<V> {
    pub fn redirect_location(&self) -> Option<&str> {
        match self {
            Page::Redirect(location) => Some(location),
            Page::Render(_) => None,
        }
    }

    pub fn rendered(&self) -> Option<&Rendered<V>> {
        match self {
            Page::Render(rendered) => Some(rendered),
            Page::Redirect(_) => None,
        }
    }
}

impl<V: Serialize> IntoResponse for Page<V> {
    fn into_response(self) -> Response {
        match self {
            Page::Render(rendered) => {
                (StatusCode::OK, Json(ApiResponse::success(rendered))).into_response()
            }
            Page::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}

// ============================================================================
// Error mapping
// ============================================================================

impl DashboardError {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::Search(_) | Self::MalformedForm(_) => StatusCode::BAD_REQUEST,
            Self::InvalidGameForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Media(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::AccessDenied => error_codes::PERMISSION_DENIED,
            Self::Search(_) | Self::MalformedForm(_) => error_codes::INVALID_PARAMETER,
            Self::InvalidGameForm(_) => error_codes::INVALID_FORM,
            Self::NotFound { .. } => error_codes::NOT_FOUND,
            Self::Media(_) | Self::Store(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let msg = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (
            status,
            Json(ApiResponse::<()>::error(self.error_code(), msg)),
        )
            .into_response()
    }
}
