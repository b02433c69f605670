//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::models::UserResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // User endpoints
        super::user::get_current_user,
    ),
    info(
        title = "Peoplebook API",
        version = "0.1.0",
        description = "Peoplebook API\n\nProtected endpoints require `Authorization: Apikey <email>:<key>` (optionally Base64-encoded) or `Authorization: Apikey email=\"...\", key=\"...\"`.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "User", description = "User - The authenticated API account"),
    ),
    components(
        schemas(
            UserResponse,
        )
    ),
    modifiers(&ApikeySecurity),
)]
pub struct ApiDoc;

/// Registers the `Apikey` Authorization scheme
struct ApikeySecurity;

impl Modify for ApikeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "apikey",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Apikey <email>:<key>",
                ))),
            );
        }
    }
}
