use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;

use super::principal::{Principal, Superuser};
use crate::dashboard::DashboardError;
use crate::gateway::{
    flash::FlashMessage,
    response::Page,
    screen::Screen,
    state::AppState,
};
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Missing session token")]
    MissingToken,

    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("Session user {0} no longer exists")]
    UnknownUser(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolve the principal behind a request's bearer token
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, SessionError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(SessionError::MissingToken)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(SessionError::InvalidToken)?;

    let user_id = state
        .sessions
        .verify(token)
        .ok()
        .and_then(|claims| claims.user_id())
        .ok_or(SessionError::InvalidToken)?;

    let user = state
        .repos
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(SessionError::UnknownUser(user_id))?;

    Ok(Principal::from_user(&user))
}

/// Requires a logged-in principal; anonymous requests go to the login page.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, request.headers()).await {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(SessionError::Store(e)) => DashboardError::from(e).into_response(),
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), "Session rejected: {}", e);
            login_redirect(request.uri().path())
        }
    }
}

/// The single superuser check in front of every admin route.
///
/// On refusal the principal gets one flash error and is sent home; the
/// admin handler never runs.
pub fn admit_superuser(state: &AppState, principal: &Principal) -> Result<Superuser, Page<()>> {
    principal.require_superuser().map_err(|e| {
        tracing::warn!(
            user_id = principal.user_id,
            username = %principal.username,
            "Admin access denied"
        );
        state.redirect(principal, Screen::Home, FlashMessage::error(e.to_string()))
    })
}

/// Layered inside `session_middleware`; injects the `Superuser` capability.
pub async fn superuser_guard(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(principal) = request.extensions().get::<Principal>().cloned() else {
        return login_redirect(request.uri().path());
    };

    match admit_superuser(&state, &principal) {
        Ok(superuser) => {
            request.extensions_mut().insert(superuser);
            next.run(request).await
        }
        Err(page) => page.into_response(),
    }
}

fn login_redirect(path: &str) -> Response {
    Page::<()>::Redirect(
        Screen::Login {
            next: path.to_string(),
        }
        .path(),
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::flash::{FlashLevel, MAX_PENDING_PER_PRINCIPAL};
    use crate::gateway::state::tests::{ADMIN_ID, CUSTOMER_ID, test_state};
    use axum::http::HeaderValue;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_authenticate_valid_token() {
        let (state, _store) = test_state();
        let token = state.sessions.issue(ADMIN_ID).unwrap();

        let principal = authenticate(&state, &bearer(&token)).await.unwrap();
        assert_eq!(principal.user_id, ADMIN_ID);
        assert!(principal.is_superuser);
    }

    #[tokio::test]
    async fn test_authenticate_missing_header() {
        let (state, _store) = test_state();
        let err = authenticate(&state, &HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, SessionError::MissingToken));
    }

    #[tokio::test]
    async fn test_authenticate_bad_scheme_and_garbage_token() {
        let (state, _store) = test_state();

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        let err = authenticate(&state, &headers).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidToken));

        let err = authenticate(&state, &bearer("not.a.jwt")).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidToken));
    }

    #[tokio::test]
    async fn test_authenticate_deleted_user() {
        let (state, _store) = test_state();
        let token = state.sessions.issue(404).unwrap();
        let err = authenticate(&state, &bearer(&token)).await.unwrap_err();
        assert!(matches!(err, SessionError::UnknownUser(404)));
    }

    #[tokio::test]
    async fn test_admit_superuser_refusal_flashes_and_redirects_home() {
        let (state, _store) = test_state();
        let token = state.sessions.issue(CUSTOMER_ID).unwrap();
        let customer = authenticate(&state, &bearer(&token)).await.unwrap();

        let page = admit_superuser(&state, &customer).unwrap_err();
        assert_eq!(page.redirect_location(), Some("/"));

        let messages = state.flash.take(CUSTOMER_ID);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].level, FlashLevel::Error);
        assert_eq!(messages[0].text, "Sorry, only admin users can do that.");
    }

    #[tokio::test]
    async fn test_repeated_refusals_keep_flash_queue_bounded() {
        let (state, _store) = test_state();
        let token = state.sessions.issue(CUSTOMER_ID).unwrap();
        let customer = authenticate(&state, &bearer(&token)).await.unwrap();

        for _ in 0..10_000 {
            assert!(admit_superuser(&state, &customer).is_err());
        }

        let messages = state.flash.take(CUSTOMER_ID);
        assert_eq!(messages.len(), MAX_PENDING_PER_PRINCIPAL);
        assert!(messages.iter().all(|m| m.level == FlashLevel::Error));
    }

    #[tokio::test]
    async fn test_admit_superuser_accepts_admin_without_flash() {
        let (state, _store) = test_state();
        let token = state.sessions.issue(ADMIN_ID).unwrap();
        let admin = authenticate(&state, &bearer(&token)).await.unwrap();

        let superuser = admit_superuser(&state, &admin).unwrap();
        assert_eq!(superuser.user_id(), ADMIN_ID);
        assert!(state.flash.take(ADMIN_ID).is_empty());
    }
}
