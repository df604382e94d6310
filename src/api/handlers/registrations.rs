//! Attendee registration handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::RegistrationRequest;
use crate::app_state::AppState;
use crate::domain::{Purchase, Registration};
use crate::error::{ErrorResponse, EventDeskError};

/// `POST /registrations`: Register an attendee for a ticket type.
///
/// # Errors
///
/// Returns [`EventDeskError`] on invalid input, unknown ticket, or store
/// failure.
#[utoipa::path(
    post,
    path = "/api/v1/registrations",
    tag = "Registrations",
    summary = "Register an attendee",
    description = "Finds or creates the attendee by email and records a purchase priced from the ticket's current price.",
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = Purchase),
        (status = 400, description = "Invalid registration", body = ErrorResponse),
        (status = 404, description = "Ticket not found", body = ErrorResponse),
    )
)]
pub async fn register_attendee(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, EventDeskError> {
    let registration = Registration::try_from(req)?;
    let purchase = state
        .event_service
        .register_attendee(&registration)
        .await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// Registration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/registrations", post(register_attendee))
}
