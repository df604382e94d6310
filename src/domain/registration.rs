//! Attendees, purchases, and the registration request that creates them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{AttendeeId, PurchaseId, TicketId};
use crate::error::EventDeskError;

/// An attendee row from the `attendees` table. Email is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Attendee {
    /// Primary key.
    pub id: AttendeeId,
    /// Name given at first registration.
    pub name: String,
    /// Email as first entered; unique ignoring case.
    pub email: String,
}

/// A purchase row from the `purchases` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Purchase {
    /// Primary key.
    pub id: PurchaseId,
    /// Buyer.
    pub attendee_id: AttendeeId,
    /// Ticket type bought.
    pub ticket_id: TicketId,
    /// Number of tickets, at least 1.
    pub quantity_purchased: i32,
    /// Unit price at purchase time multiplied by quantity.
    pub total_price: Decimal,
    /// When the purchase was recorded.
    pub purchased_at: DateTime<Utc>,
}

/// One line of an event's attendee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendeeListing {
    /// Attendee name.
    pub name: String,
    /// Attendee email.
    pub email: String,
    /// Label of the ticket type bought.
    pub ticket_type: String,
    /// Number of tickets in the purchase.
    pub quantity_purchased: i32,
    /// When the purchase was recorded.
    pub purchased_at: DateTime<Utc>,
}

/// A validated request to register an attendee for a ticket type.
///
/// The total price is deliberately absent: it is always derived from the
/// ticket's current price inside the registering transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    ticket_id: TicketId,
    quantity: i32,
}

impl Registration {
    /// Validates and builds a registration.
    ///
    /// The email is trimmed but otherwise kept as entered. Stores match it
    /// against existing attendees ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::Validation`] if the name is blank, the
    /// email has no `@`, or the quantity is below 1.
    pub fn new(
        name: impl Into<String>,
        email: impl AsRef<str>,
        ticket_id: TicketId,
        quantity: i32,
    ) -> Result<Self, EventDeskError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(EventDeskError::Validation(
                "attendee name must not be empty".to_string(),
            ));
        }
        let email = email.as_ref().trim().to_string();
        if !is_plausible_email(&email) {
            return Err(EventDeskError::Validation(format!(
                "invalid attendee email: {email:?}"
            )));
        }
        if quantity < 1 {
            return Err(EventDeskError::Validation(format!(
                "quantity must be at least 1 (got {quantity})"
            )));
        }
        Ok(Self {
            name,
            email,
            ticket_id,
            quantity,
        })
    }

    /// Attendee name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attendee email, trimmed.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Ticket type to buy.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// Number of tickets to buy.
    #[must_use]
    pub const fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Computes `unit_price × quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::Validation`] if the product overflows.
    pub fn total_price(&self, unit_price: Decimal) -> Result<Decimal, EventDeskError> {
        unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| EventDeskError::Validation("purchase total overflows".to_string()))
    }
}

/// Key under which an email identifies an attendee: trimmed and lowercased.
#[must_use]
pub fn email_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
