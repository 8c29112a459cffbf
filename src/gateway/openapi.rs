//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8000/docs`
//! - OpenAPI JSON: `http://localhost:8000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::User;
use crate::audit::{ActionFlag, AuditLogEntry};
use crate::catalog::{Game, GameForm};
use crate::checkout::Order;
use crate::gateway::flash::{FlashLevel, FlashMessage};
use crate::gateway::handlers::HealthResponse;

/// Session token issued by the storefront login
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "HS256 session token, subject = user id. Requests without a valid \
                             token are redirected to /accounts/login/?next=<path>.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Game Store Admin Dashboard API",
        version = "1.0.0",
        description = "Superuser-gated game, user and order management with search and sales reporting.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        // Admin (superuser)
        crate::gateway::handlers::dashboard::dashboard,
        crate::gateway::handlers::games::add_game_form,
        crate::gateway::handlers::games::add_game,
        crate::gateway::handlers::games::edit_game_form,
        crate::gateway::handlers::games::edit_game,
        crate::gateway::handlers::games::delete_game,
        crate::gateway::handlers::users::delete_user,
        // Management (any session)
        crate::gateway::handlers::management::games_management,
        crate::gateway::handlers::management::users_management,
        crate::gateway::handlers::management::orders_management,
    ),
    components(
        schemas(
            HealthResponse,
            Game,
            GameForm,
            User,
            Order,
            AuditLogEntry,
            ActionFlag,
            FlashMessage,
            FlashLevel,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Admin", description = "Dashboard summary and game/user administration (superuser only)"),
        (name = "Management", description = "Searchable listings (session required)"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
