//! Ticket type handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::CreateTicketRequest;
use crate::app_state::AppState;
use crate::domain::{EventId, NewTicket, Ticket};
use crate::error::{ErrorResponse, EventDeskError};

/// `POST /events/{id}/tickets`: Add a ticket type to an event.
///
/// # Errors
///
/// Returns [`EventDeskError`] on invalid input, unknown event, or store
/// failure.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/tickets",
    tag = "Tickets",
    summary = "Create a ticket type",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket type created", body = Ticket),
        (status = 400, description = "Negative price or quantity", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn create_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<impl IntoResponse, EventDeskError> {
    let ticket = NewTicket::try_from(req)?;
    let ticket = state
        .event_service
        .create_ticket_type(EventId::new(id), &ticket)
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// `GET /events/{id}/tickets`: List an event's ticket types.
///
/// # Errors
///
/// Returns [`EventDeskError`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/tickets",
    tag = "Tickets",
    summary = "List ticket types",
    params(
        ("id" = i64, Path, description = "Event id"),
    ),
    responses(
        (status = 200, description = "Ticket types of the event", body = Vec<Ticket>),
    )
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, EventDeskError> {
    let tickets = state
        .event_service
        .list_ticket_types(EventId::new(id))
        .await?;
    Ok(Json(tickets))
}

/// Ticket type routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/events/{id}/tickets", post(create_ticket).get(list_tickets))
}
