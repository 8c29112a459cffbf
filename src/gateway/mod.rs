pub mod flash;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod screen;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::user_auth::{session_middleware, superuser_guard};
use state::AppState;

/// Room for the text fields and multipart framing around an image upload
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the dashboard router.
///
/// Layering: every `/dashboard/` route sits behind the session middleware;
/// the admin routes additionally sit behind the superuser guard, which runs
/// after the session has been resolved.
pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit =
        DefaultBodyLimit::max(state.service.max_upload_bytes() + FORM_OVERHEAD_BYTES);

    // ==========================================================================
    // Admin Routes (superuser only)
    // ==========================================================================
    let admin_routes = Router::new()
        .route("/dashboard/", get(handlers::dashboard))
        .route(
            "/dashboard/add_game/",
            get(handlers::add_game_form).post(handlers::add_game),
        )
        .route(
            "/dashboard/edit_game/{game_id}/",
            get(handlers::edit_game_form).post(handlers::edit_game),
        )
        .route("/dashboard/delete_game/{game_id}/", post(handlers::delete_game))
        .route("/dashboard/delete_user/{user_id}/", post(handlers::delete_user))
        .route_layer(from_fn_with_state(state.clone(), superuser_guard))
        .layer(upload_limit);

    // ==========================================================================
    // Management Routes (any logged-in principal)
    // ==========================================================================
    let management_routes = Router::new()
        .route(
            "/dashboard/games_management/",
            get(handlers::games_management),
        )
        .route(
            "/dashboard/users_management/",
            get(handlers::users_management),
        )
        .route(
            "/dashboard/orders_management/",
            get(handlers::orders_management),
        );

    let dashboard_routes = admin_routes
        .merge(management_routes)
        .route_layer(from_fn_with_state(state.clone(), session_middleware));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .merge(dashboard_routes)
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Serve the dashboard on an already bound listener
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind `host:port` and serve until the process stops
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {}: {} (port {} may already be in use)",
            addr,
            e,
            port
        )
    })?;

    tracing::info!("Dashboard listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);
    tracing::info!("Backend: {}", state.repos.backend_name());

    serve(listener, state).await
}
