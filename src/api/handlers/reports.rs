//! Read-side handlers: attendee listing and sales dashboard.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::{AttendeeListing, EventId, EventMetrics};
use crate::error::{ErrorResponse, EventDeskError};

/// `GET /events/{id}/attendees`: Purchases of an event, oldest first.
///
/// # Errors
///
/// Returns [`EventDeskError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/attendees",
    tag = "Reports",
    summary = "List attendees",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Attendee purchases", body = Vec<AttendeeListing>),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn list_attendees(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, EventDeskError> {
    let listing = state.event_service.list_attendees(EventId::new(id)).await?;
    Ok(Json(listing))
}

/// `GET /events/{id}/dashboard`: Sales metrics of an event.
///
/// # Errors
///
/// Returns [`EventDeskError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/dashboard",
    tag = "Reports",
    summary = "Event dashboard",
    description = "Tickets sold, revenue, distinct attendees, per-type breakdown and purchase statistics. Events without purchases report zeroes.",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Event metrics", body = EventMetrics),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, EventDeskError> {
    let metrics = state.event_service.dashboard(EventId::new(id)).await?;
    Ok(Json(metrics))
}

/// Reporting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/{id}/attendees", get(list_attendees))
        .route("/events/{id}/dashboard", get(dashboard))
}
