//! Ticket types offered for an event.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, TicketId};
use crate::error::EventDeskError;

/// A ticket type row from the `tickets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    /// Primary key.
    pub id: TicketId,
    /// Event the ticket type belongs to.
    pub event_id: EventId,
    /// Label such as `"General"` or `"VIP"`.
    pub ticket_type: String,
    /// Unit price.
    pub price: Decimal,
    /// Declared capacity. Not enforced against purchases.
    pub quantity_available: i32,
}

/// A validated ticket type ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    ticket_type: String,
    price: Decimal,
    quantity_available: i32,
}

impl NewTicket {
    /// Validates and builds a ticket type.
    ///
    /// The price is rounded to cents, matching the `NUMERIC(12, 2)` column.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::Validation`] if the label is blank, the
    /// price is negative, or the available quantity is negative.
    pub fn new(
        ticket_type: impl Into<String>,
        price: Decimal,
        quantity_available: i32,
    ) -> Result<Self, EventDeskError> {
        let ticket_type = ticket_type.into().trim().to_string();
        if ticket_type.is_empty() {
            return Err(EventDeskError::Validation(
                "ticket type must not be empty".to_string(),
            ));
        }
        if price < Decimal::ZERO {
            return Err(EventDeskError::Validation(format!(
                "ticket price must not be negative (got {price})"
            )));
        }
        if quantity_available < 0 {
            return Err(EventDeskError::Validation(format!(
                "quantity available must not be negative (got {quantity_available})"
            )));
        }
        Ok(Self {
            ticket_type,
            price: price.round_dp(2),
            quantity_available,
        })
    }

    /// Ticket label.
    #[must_use]
    pub fn ticket_type(&self) -> &str {
        &self.ticket_type
    }

    /// Unit price, rounded to cents.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Declared capacity.
    #[must_use]
    pub const fn quantity_available(&self) -> i32 {
        self.quantity_available
    }

    /// Attaches store-assigned keys, producing the persisted row.
    #[must_use]
    pub fn into_ticket(self, id: TicketId, event_id: EventId) -> Ticket {
        Ticket {
            id,
            event_id,
            ticket_type: self.ticket_type,
            price: self.price,
            quantity_available: self.quantity_available,
        }
    }
}
