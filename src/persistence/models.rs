//! Database row models and their conversion into domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    Attendee, AttendeeId, AttendeeListing, Event, EventId, Purchase, PurchaseId, Ticket, TicketId,
    UserId,
};

/// Row counts removed by an event delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    /// Purchases of the event's tickets.
    pub purchases: u64,
    /// Ticket types of the event.
    pub tickets: u64,
    /// Event rows; `0` when the event did not exist.
    pub events: u64,
}

/// A row of the `events` table.
#[derive(Debug, sqlx::FromRow)]
pub struct EventRow {
    /// Primary key.
    pub event_id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Title.
    pub event_name: String,
    /// Date.
    pub event_date: NaiveDate,
    /// Time.
    pub event_time: NaiveTime,
    /// Venue.
    pub location: String,
    /// Description.
    pub description: String,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::new(row.event_id),
            owner_id: UserId::new(row.user_id),
            name: row.event_name,
            date: row.event_date,
            time: row.event_time,
            location: row.location,
            description: row.description,
        }
    }
}

/// A row of the `tickets` table.
#[derive(Debug, sqlx::FromRow)]
pub struct TicketRow {
    /// Primary key.
    pub ticket_id: i64,
    /// Owning event.
    pub event_id: i64,
    /// Label.
    pub ticket_type: String,
    /// Unit price.
    pub price: Decimal,
    /// Declared capacity.
    pub quantity_available: i32,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Self {
            id: TicketId::new(row.ticket_id),
            event_id: EventId::new(row.event_id),
            ticket_type: row.ticket_type,
            price: row.price,
            quantity_available: row.quantity_available,
        }
    }
}

/// A row of the `attendees` table.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendeeRow {
    /// Primary key.
    pub attendee_id: i64,
    /// Name.
    pub name: String,
    /// Unique email.
    pub email: String,
}

impl From<AttendeeRow> for Attendee {
    fn from(row: AttendeeRow) -> Self {
        Self {
            id: AttendeeId::new(row.attendee_id),
            name: row.name,
            email: row.email,
        }
    }
}

/// A row of the `purchases` table.
#[derive(Debug, sqlx::FromRow)]
pub struct PurchaseRow {
    /// Primary key.
    pub purchase_id: i64,
    /// Buyer.
    pub attendee_id: i64,
    /// Ticket type.
    pub ticket_id: i64,
    /// Quantity.
    pub quantity_purchased: i32,
    /// Derived total.
    pub total_price: Decimal,
    /// Server timestamp.
    pub purchase_date: DateTime<Utc>,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Self {
            id: PurchaseId::new(row.purchase_id),
            attendee_id: AttendeeId::new(row.attendee_id),
            ticket_id: TicketId::new(row.ticket_id),
            quantity_purchased: row.quantity_purchased,
            total_price: row.total_price,
            purchased_at: row.purchase_date,
        }
    }
}

/// One joined row of the attendee listing query.
#[derive(Debug, sqlx::FromRow)]
pub struct AttendeeListingRow {
    /// Attendee name.
    pub name: String,
    /// Attendee email.
    pub email: String,
    /// Ticket label.
    pub ticket_type: String,
    /// Quantity.
    pub quantity_purchased: i32,
    /// Purchase timestamp.
    pub purchase_date: DateTime<Utc>,
}

impl From<AttendeeListingRow> for AttendeeListing {
    fn from(row: AttendeeListingRow) -> Self {
        Self {
            name: row.name,
            email: row.email,
            ticket_type: row.ticket_type,
            quantity_purchased: row.quantity_purchased,
            purchased_at: row.purchase_date,
        }
    }
}

/// Scalar aggregates of the dashboard query.
#[derive(Debug, sqlx::FromRow)]
pub struct MetricsRow {
    /// `COALESCE(SUM(quantity_purchased), 0)`.
    pub total_tickets_sold: i64,
    /// `COALESCE(SUM(total_price), 0)`.
    pub total_revenue: Decimal,
    /// `COUNT(DISTINCT attendee_id)`.
    pub attendee_count: i64,
    /// `ROUND(AVG(total_price), 2)`.
    pub avg_purchase: Option<Decimal>,
    /// `MIN(total_price)`.
    pub min_purchase: Option<Decimal>,
    /// `MAX(total_price)`.
    pub max_purchase: Option<Decimal>,
}
