use axum::{extract::FromRef, middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod auth;
mod config;
mod models;
mod routes;

use adapters::PgUserRepository;
use auth::ApiKeyAuth;
use config::ServerConfig;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub auth: ApiKeyAuth,
}

impl FromRef<AppState> for ApiKeyAuth {
    fn from_ref(state: &AppState) -> ApiKeyAuth {
        state.auth.clone()
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full router: public routes plus the API key protected API
fn app(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::user::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("📇 Peoplebook API initializing...");

    let config = ServerConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("🐘 Database connected");

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("✅ Database migrations completed");

    let users = Arc::new(PgUserRepository::new(pool));
    let state = AppState {
        auth: ApiKeyAuth::new(users),
    };

    tracing::info!("🔐 API key authentication enabled for /api");

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Peoplebook API listening on {}", config.listen_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
