// Join HTTP routes

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use bson::{oid::ObjectId, Document};
use std::sync::Arc;

use wecare_core::{DeleteAck, InsertAck, JoinDocument};
use wecare_storage::Database;

use crate::auth::{IdentityVerifier, Principal};
use crate::services::JoinService;

/// App state for join routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<JoinService>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(db: Arc<Database>, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            service: Arc::new(JoinService::new(db)),
            verifier,
        }
    }
}

impl FromRef<AppState> for Arc<dyn IdentityVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

/// Create join routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/joinEvent", post(create_join))
        .route("/joinedEvent/user/{userEmail}", get(joins_by_user))
        .route("/joinedEvent/{id}", delete(delete_join))
        .route("/isJoined/{userEmail}/{eventId}", get(is_joined))
        .with_state(state)
}

/// POST /joinEvent - Record a user joining an event
#[utoipa::path(
    post,
    path = "/joinEvent",
    request_body = Object,
    responses(
        (status = 200, description = "Join stored", body = InsertAck),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    tag = "joins"
)]
pub async fn create_join(
    State(state): State<AppState>,
    principal: Principal,
    Json(document): Json<Document>,
) -> Result<Json<InsertAck>, StatusCode> {
    tracing::debug!(user = %principal.email, "create join");
    let ack = state.service.create(document).await.map_err(|e| {
        tracing::error!("Failed to create join: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ack))
}

/// GET /joinedEvent/user/{userEmail} - List a user's joins
#[utoipa::path(
    get,
    path = "/joinedEvent/user/{userEmail}",
    params(
        ("userEmail" = String, Path, description = "Attendee email, exact match")
    ),
    responses(
        (status = 200, description = "The user's joins, date-sorted", body = [JoinDocument]),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    tag = "joins"
)]
pub async fn joins_by_user(
    State(state): State<AppState>,
    _principal: Principal,
    Path(user_email): Path<String>,
) -> Result<Json<Vec<JoinDocument>>, StatusCode> {
    let joins = state.service.for_user(&user_email).await.map_err(|e| {
        tracing::error!("Failed to list joins: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(joins))
}

/// GET /isJoined/{userEmail}/{eventId} - Join records for a user and event
#[utoipa::path(
    get,
    path = "/isJoined/{userEmail}/{eventId}",
    params(
        ("userEmail" = String, Path, description = "Attendee email, exact match"),
        ("eventId" = String, Path, description = "Event id the join refers to")
    ),
    responses(
        (status = 200, description = "Matching joins; empty when not joined", body = [JoinDocument]),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    tag = "joins"
)]
pub async fn is_joined(
    State(state): State<AppState>,
    _principal: Principal,
    Path((user_email, event_id)): Path<(String, String)>,
) -> Result<Json<Vec<JoinDocument>>, StatusCode> {
    let joins = state
        .service
        .status(&user_email, &event_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check join status: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(joins))
}

/// DELETE /joinedEvent/{id} - Remove a join record
#[utoipa::path(
    delete,
    path = "/joinedEvent/{id}",
    params(
        ("id" = String, Path, description = "Join id (24-char hex)")
    ),
    responses(
        (status = 200, description = "Deletion acknowledgment", body = DeleteAck),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    tag = "joins"
)]
pub async fn delete_join(
    State(state): State<AppState>,
    _principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, StatusCode> {
    let id = ObjectId::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ack = state.service.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete join: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ack))
}
