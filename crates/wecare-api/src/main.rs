// weCare API server
// Decision: absence is an empty result with status 200, never a 404; the only
// error bodies on the wire are the fixed 401 message and bare status codes

mod auth;
mod config;
mod events;
mod joins;
mod services;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{HttpVerifier, IdentityVerifier, InsecureVerifier};
use config::Config;
use wecare_core::{DeleteAck, EventDocument, InsertAck, JoinDocument, UpdateAck};
use wecare_storage::Database;

async fn health() -> &'static str {
    "weCare Server Running"
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        events::create_event,
        events::list_upcoming_events,
        events::search_events,
        events::events_in_category,
        events::events_by_creator,
        events::get_event,
        events::update_event,
        events::delete_event,
        joins::create_join,
        joins::joins_by_user,
        joins::is_joined,
        joins::delete_join,
    ),
    components(
        schemas(EventDocument, JoinDocument, InsertAck, DeleteAck, UpdateAck)
    ),
    tags(
        (name = "events", description = "Event browsing and management endpoints"),
        (name = "joins", description = "Event attendance endpoints")
    ),
    info(
        title = "weCare API",
        version = "0.1.0",
        description = "Backend API for the weCare event-management application",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

/// Build the full application router (extracted for testing)
fn build_app(db: Arc<Database>, verifier: Arc<dyn IdentityVerifier>) -> Router {
    let events_state = events::AppState::new(db.clone(), verifier.clone());
    let joins_state = joins::AppState::new(db, verifier);

    Router::new()
        .route("/", get(health))
        .merge(events::routes(events_state))
        .merge(joins::routes(joins_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // The UI is served from arbitrary origins; every endpoint is open
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional outside development; it must load before the log
    // filter is built so a RUST_LOG set there takes effect
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wecare_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("wecare-api starting...");

    let config = Config::from_env().context("Invalid configuration")?;

    let db = Database::from_uri(&config.mongodb_uri, &config.mongodb_db)
        .await
        .context("Failed to open database handle")?;
    tracing::info!(db = %config.mongodb_db, "Database handle ready");

    let verifier: Arc<dyn IdentityVerifier> = match &config.credentials {
        Some(credentials) => {
            let verifier =
                HttpVerifier::new(credentials).context("Failed to build identity verifier")?;
            tracing::info!(project = %credentials.project_id, "Token verification enabled");
            Arc::new(verifier)
        }
        None => Arc::new(InsecureVerifier),
    };

    let app = build_app(Arc::new(db), verifier);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
