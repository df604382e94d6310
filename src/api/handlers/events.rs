//! Event CRUD handlers: create, list, get, update, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::EventRequest;
use crate::app_state::AppState;
use crate::domain::{Event, EventDetails, EventId};
use crate::error::{ErrorResponse, EventDeskError};

/// `POST /events`: Create an event.
///
/// # Errors
///
/// Returns [`EventDeskError`] on invalid input or store failure.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Creates an event owned by the default organizer.",
    request_body = EventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid event details", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<EventRequest>,
) -> Result<impl IntoResponse, EventDeskError> {
    let details = EventDetails::try_from(req)?;
    let event = state
        .event_service
        .create_event(state.owner_id, &details)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events`: List events, newest date first.
///
/// # Errors
///
/// Returns [`EventDeskError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns every event ordered by date, newest first.",
    responses(
        (status = 200, description = "Event list", body = Vec<Event>),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, EventDeskError> {
    let events = state.event_service.list_events().await?;
    Ok(Json(events))
}

/// `GET /events/{id}`: Get one event.
///
/// # Errors
///
/// Returns [`EventDeskError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get an event",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event", body = Event),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, EventDeskError> {
    let event = state.event_service.get_event(EventId::new(id)).await?;
    Ok(Json(event))
}

/// `PUT /events/{id}`: Replace an event's fields.
///
/// # Errors
///
/// Returns [`EventDeskError::EventNotFound`] if the event does not exist,
/// or another [`EventDeskError`] on invalid input or store failure.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Update an event",
    description = "Replaces name, date, time, location and description.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    request_body = EventRequest,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 400, description = "Invalid event details", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EventRequest>,
) -> Result<impl IntoResponse, EventDeskError> {
    let id = EventId::new(id);
    let details = EventDetails::try_from(req)?;
    if !state.event_service.update_event(id, &details).await? {
        return Err(EventDeskError::EventNotFound(id));
    }
    let event = state.event_service.get_event(id).await?;
    Ok(Json(event))
}

/// `DELETE /events/{id}`: Delete an event with its tickets and purchases.
///
/// # Errors
///
/// Returns [`EventDeskError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Delete an event",
    description = "Deletes the event's purchases, then its ticket types, then the event, in one transaction.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, EventDeskError> {
    let id = EventId::new(id);
    let report = state.event_service.delete_event(id).await?;
    if report.events == 0 {
        return Err(EventDeskError::EventNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Event management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}
