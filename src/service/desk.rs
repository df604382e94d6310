//! Presentation-facing contract.
//!
//! [`EventDesk`] is what a form-driven front end calls. No error escapes:
//! each failure is logged with the action that was attempted and turns into
//! `false`, an empty list, or `None`, and the caller renders its own
//! message.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use super::EventService;
use crate::domain::{
    AttendeeListing, Event, EventDetails, EventId, EventMetrics, NewTicket, Registration, Ticket,
    TicketId, User, UserId,
};
use crate::error::EventDeskError;
use crate::persistence::Store;

/// Boolean/collection facade over [`EventService`].
#[derive(Debug, Clone)]
pub struct EventDesk {
    service: EventService,
}

impl EventDesk {
    /// Wraps an existing service.
    #[must_use]
    pub fn new(service: EventService) -> Self {
        Self { service }
    }

    /// Builds a desk directly over a store.
    #[must_use]
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self::new(EventService::new(store))
    }

    /// Returns the typed service behind this desk.
    #[must_use]
    pub fn service(&self) -> &EventService {
        &self.service
    }

    /// Ensures the organizer row exists. `true` if it exists afterwards.
    pub async fn ensure_default_user(
        &self,
        id: UserId,
        name: &str,
        email: &str,
        organization: &str,
    ) -> bool {
        let user = User::new(id, name, email, organization);
        report(
            "ensure default user",
            self.service.ensure_default_user(&user).await,
        )
        .is_some()
    }

    /// Creates an event. `true` on commit.
    pub async fn create_event(
        &self,
        owner_id: UserId,
        name: &str,
        date: NaiveDate,
        time: NaiveTime,
        location: &str,
        description: &str,
    ) -> bool {
        let result = match EventDetails::new(name, date, time, location, description) {
            Ok(details) => self.service.create_event(owner_id, &details).await,
            Err(err) => Err(err),
        };
        report("create event", result).is_some()
    }

    /// Replaces an event's fields.
    ///
    /// Returns `true` whenever the statement ran, including when no event
    /// had the given id.
    pub async fn update_event(
        &self,
        id: EventId,
        name: &str,
        date: NaiveDate,
        time: NaiveTime,
        location: &str,
        description: &str,
    ) -> bool {
        let result = match EventDetails::new(name, date, time, location, description) {
            Ok(details) => self.service.update_event(id, &details).await,
            Err(err) => Err(err),
        };
        report("update event", result).is_some()
    }

    /// Deletes an event with its tickets and purchases. `true` on commit.
    pub async fn delete_event(&self, id: EventId) -> bool {
        report("delete event", self.service.delete_event(id).await).is_some()
    }

    /// Adds a ticket type to an event. `true` on commit.
    pub async fn create_ticket_type(
        &self,
        event_id: EventId,
        label: &str,
        price: Decimal,
        quantity_available: i32,
    ) -> bool {
        let result = match NewTicket::new(label, price, quantity_available) {
            Ok(ticket) => self.service.create_ticket_type(event_id, &ticket).await,
            Err(err) => Err(err),
        };
        report("create ticket type", result).is_some()
    }

    /// Registers an attendee and records the purchase. `true` on commit.
    pub async fn register_attendee(
        &self,
        name: &str,
        email: &str,
        ticket_id: TicketId,
        quantity: i32,
    ) -> bool {
        let result = match Registration::new(name, email, ticket_id, quantity) {
            Ok(registration) => self.service.register_attendee(&registration).await,
            Err(err) => Err(err),
        };
        report("register attendee", result).is_some()
    }

    /// All events, newest date first; empty on failure.
    pub async fn list_events(&self) -> Vec<Event> {
        report("list events", self.service.list_events().await).unwrap_or_default()
    }

    /// Ticket types of an event; empty on failure.
    pub async fn list_ticket_types(&self, event_id: EventId) -> Vec<Ticket> {
        report(
            "list ticket types",
            self.service.list_ticket_types(event_id).await,
        )
        .unwrap_or_default()
    }

    /// Attendee list of an event, oldest purchase first; empty on failure.
    pub async fn list_attendees(&self, event_id: EventId) -> Vec<AttendeeListing> {
        report("list attendees", self.service.list_attendees(event_id).await).unwrap_or_default()
    }

    /// Dashboard metrics of an event; `None` on failure.
    pub async fn get_dashboard(&self, event_id: EventId) -> Option<EventMetrics> {
        report("load dashboard", self.service.dashboard(event_id).await)
    }
}

/// Logs a failed operation and discards the error.
fn report<T>(action: &'static str, result: Result<T, EventDeskError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) if err.is_connection_failure() => {
            tracing::error!(action, error = %err, "database unavailable");
            None
        }
        Err(err) => {
            tracing::error!(action, code = err.error_code(), error = %err, "operation failed");
            None
        }
    }
}
