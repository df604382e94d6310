//! Ticket type DTOs.

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::NewTicket;
use crate::error::EventDeskError;

/// Request body for `POST /events/{id}/tickets`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    /// Label such as `"General"`.
    pub ticket_type: String,
    /// Unit price as a decimal string, e.g. `"50.00"`.
    #[schema(value_type = String, example = "50.00")]
    pub price: Decimal,
    /// Declared capacity.
    pub quantity_available: i32,
}

impl TryFrom<CreateTicketRequest> for NewTicket {
    type Error = EventDeskError;

    fn try_from(req: CreateTicketRequest) -> Result<Self, Self::Error> {
        Self::new(req.ticket_type, req.price, req.quantity_available)
    }
}
