//! Registration DTOs.

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Registration, TicketId};
use crate::error::EventDeskError;

/// Request body for `POST /registrations`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegistrationRequest {
    /// Attendee name.
    pub name: String,
    /// Attendee email; identifies returning attendees.
    pub email: String,
    /// Ticket type to buy.
    pub ticket_id: TicketId,
    /// Number of tickets, at least 1.
    pub quantity: i32,
}

impl TryFrom<RegistrationRequest> for Registration {
    type Error = EventDeskError;

    fn try_from(req: RegistrationRequest) -> Result<Self, Self::Error> {
        Self::new(req.name, req.email, req.ticket_id, req.quantity)
    }
}
