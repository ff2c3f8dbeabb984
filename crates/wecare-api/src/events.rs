// Event HTTP routes

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use bson::{oid::ObjectId, Document};
use std::sync::Arc;

use wecare_core::{DeleteAck, EventDocument, InsertAck, UpdateAck};
use wecare_storage::Database;

use crate::auth::{IdentityVerifier, Principal};
use crate::services::EventService;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
    pub verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(db: Arc<Database>, verifier: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            service: Arc::new(EventService::new(db)),
            verifier,
        }
    }
}

impl FromRef<AppState> for Arc<dyn IdentityVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/event", post(create_event))
        .route("/event/{id}", get(get_event))
        .route("/events", get(list_upcoming_events))
        .route("/events/{search}", get(search_events).delete(delete_event))
        .route("/events/category/{category}", get(events_in_category))
        .route("/events/user/{email}", get(events_by_creator))
        .route("/updateEvent/{eventId}", put(update_event))
        .with_state(state)
}

/// POST /event - Create a new event
#[utoipa::path(
    post,
    path = "/event",
    request_body = Object,
    responses(
        (status = 200, description = "Event stored", body = InsertAck),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    principal: Principal,
    Json(document): Json<Document>,
) -> Result<Json<InsertAck>, StatusCode> {
    tracing::debug!(user = %principal.email, "create event");
    let ack = state.service.create(document).await.map_err(|e| {
        tracing::error!("Failed to create event: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ack))
}

/// GET /events - List upcoming events, earliest first
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Upcoming events, date-sorted", body = [EventDocument]),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn list_upcoming_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventDocument>>, StatusCode> {
    let events = state.service.list_upcoming().await.map_err(|e| {
        tracing::error!("Failed to list events: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(events))
}

/// GET /events/{search} - Search upcoming events by title
#[utoipa::path(
    get,
    path = "/events/{search}",
    params(
        ("search" = String, Path, description = "Title phrase; matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Matching upcoming events, date-sorted", body = [EventDocument]),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn search_events(
    State(state): State<AppState>,
    Path(search): Path<String>,
) -> Result<Json<Vec<EventDocument>>, StatusCode> {
    let events = state.service.search(&search).await.map_err(|e| {
        tracing::error!("Failed to search events: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(events))
}

/// GET /events/category/{category} - List events in a category
#[utoipa::path(
    get,
    path = "/events/category/{category}",
    params(
        ("category" = String, Path, description = "Exact category, case-sensitive")
    ),
    responses(
        (status = 200, description = "Events in the category", body = [EventDocument]),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn events_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<EventDocument>>, StatusCode> {
    let events = state.service.in_category(&category).await.map_err(|e| {
        tracing::error!("Failed to list events by category: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(events))
}

/// GET /events/user/{email} - List events created by an email
#[utoipa::path(
    get,
    path = "/events/user/{email}",
    params(
        ("email" = String, Path, description = "Creator email, exact match")
    ),
    responses(
        (status = 200, description = "Events created by the email", body = [EventDocument]),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn events_by_creator(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<EventDocument>>, StatusCode> {
    let events = state.service.by_creator(&email).await.map_err(|e| {
        tracing::error!("Failed to list events by creator: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(events))
}

/// GET /event/{id} - Get a single event
#[utoipa::path(
    get,
    path = "/event/{id}",
    params(
        ("id" = String, Path, description = "Event id (24-char hex)")
    ),
    responses(
        (status = 200, description = "Event document, or null when absent", body = EventDocument),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<EventDocument>>, StatusCode> {
    let id = ObjectId::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let event = state.service.get(id).await.map_err(|e| {
        tracing::error!("Failed to fetch event: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(event))
}

/// PUT /updateEvent/{eventId} - Merge fields into an event
#[utoipa::path(
    put,
    path = "/updateEvent/{eventId}",
    params(
        ("eventId" = String, Path, description = "Event id (24-char hex)")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Update acknowledgment", body = UpdateAck),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    _principal: Principal,
    Path(event_id): Path<String>,
    Json(changes): Json<Document>,
) -> Result<Json<UpdateAck>, StatusCode> {
    let id = ObjectId::parse_str(&event_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ack = state.service.update(id, changes).await.map_err(|e| {
        tracing::error!("Failed to update event: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ack))
}

/// DELETE /events/{eventId} - Delete an event
#[utoipa::path(
    delete,
    path = "/events/{eventId}",
    params(
        ("eventId" = String, Path, description = "Event id (24-char hex)")
    ),
    responses(
        (status = 200, description = "Deletion acknowledgment", body = DeleteAck),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Store failure")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    _principal: Principal,
    Path(event_id): Path<String>,
) -> Result<Json<DeleteAck>, StatusCode> {
    let id = ObjectId::parse_str(&event_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let ack = state.service.delete(id).await.map_err(|e| {
        tracing::error!("Failed to delete event: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ack))
}
