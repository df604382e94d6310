//! Persistence layer: the relational store behind every operation.
//!
//! [`Store`] is the seam between the service and the database. Every
//! mutation is one transaction: it either applies completely or leaves no
//! trace. [`postgres::PostgresStore`] backs it with a lazily connected
//! `sqlx::PgPool`; [`memory::MemoryStore`] keeps the same semantics in
//! process for tests and local runs.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use models::CascadeReport;
pub use postgres::PostgresStore;

use crate::domain::{
    Attendee, AttendeeListing, Event, EventDetails, EventId, EventMetrics, NewTicket, Purchase,
    Registration, Ticket, User, UserId,
};
use crate::error::EventDeskError;

/// Transactional access to users, events, tickets, attendees and purchases.
#[async_trait]
pub trait Store: Send + Sync + fmt::Debug {
    /// Inserts `user` unless a row with its id exists. Returns `true` if a
    /// row was inserted.
    async fn ensure_user(&self, user: &User) -> Result<bool, EventDeskError>;

    /// Inserts an event owned by `owner_id`.
    ///
    /// Fails with [`EventDeskError::ConstraintViolation`] if the owner does
    /// not exist.
    async fn create_event(
        &self,
        owner_id: UserId,
        details: &EventDetails,
    ) -> Result<Event, EventDeskError>;

    /// Looks up one event.
    async fn get_event(&self, id: EventId) -> Result<Option<Event>, EventDeskError>;

    /// Replaces the editable columns of an event. Returns `false` if no row
    /// matched.
    async fn update_event(&self, id: EventId, details: &EventDetails)
    -> Result<bool, EventDeskError>;

    /// Deletes an event together with its tickets and their purchases.
    async fn delete_event(&self, id: EventId) -> Result<CascadeReport, EventDeskError>;

    /// Adds a ticket type to an existing event.
    async fn create_ticket(
        &self,
        event_id: EventId,
        ticket: &NewTicket,
    ) -> Result<Ticket, EventDeskError>;

    /// Resolves the attendee by email, prices the ticket and records the
    /// purchase, all in one transaction.
    async fn register_attendee(
        &self,
        registration: &Registration,
    ) -> Result<Purchase, EventDeskError>;

    /// Finds an attendee by normalized email.
    async fn find_attendee(&self, email: &str) -> Result<Option<Attendee>, EventDeskError>;

    /// All events, newest date first.
    async fn list_events(&self) -> Result<Vec<Event>, EventDeskError>;

    /// Ticket types of one event, in creation order.
    async fn list_tickets(&self, event_id: EventId) -> Result<Vec<Ticket>, EventDeskError>;

    /// Purchases for one event joined with attendee and ticket type, oldest
    /// first.
    async fn list_attendees(
        &self,
        event_id: EventId,
    ) -> Result<Vec<AttendeeListing>, EventDeskError>;

    /// Sales metrics for one event. Unknown events yield empty metrics.
    async fn event_metrics(&self, event_id: EventId) -> Result<EventMetrics, EventDeskError>;
}
