/// OpenAPI documentation for the blog service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Platform API",
        version = "1.0.0",
        description = "Multi-tenant blogging platform backend. Role-scoped session tokens over posts, categories, tags, comments, likes, media attachments, and notifications, with a WebSocket broadcast side channel.",
        license(
            name = "MIT"
        )
    ),
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
    ),
    components(schemas(RegisterRequest, RegisterResponse, LoginRequest, LoginResponse)),
    tags(
        (name = "auth", description = "Registration and session token issuance"),
        (name = "posts", description = "Post creation, retrieval, updates, and deletion"),
        (name = "categories", description = "Shared category reference data"),
        (name = "tags", description = "Shared tag reference data"),
        (name = "comments", description = "Comment management on posts"),
        (name = "likes", description = "Post likes"),
        (name = "media", description = "Media attachment uploads"),
        (name = "notifications", description = "Per-recipient durable notifications"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
