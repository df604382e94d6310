//! Domain layer: typed entities, identifiers, validation, and metrics.
//!
//! Every table row maps to an explicit struct here. Inputs that reach the
//! store ([`EventDetails`], [`NewTicket`], [`Registration`]) are validated
//! on construction, so invalid values never leave this module.

pub mod event;
pub mod ids;
pub mod metrics;
pub mod registration;
pub mod ticket;
pub mod user;

pub use event::{Event, EventDetails};
pub use ids::{AttendeeId, EventId, PurchaseId, TicketId, UserId};
pub use metrics::{EventMetrics, MetricsAccumulator};
pub use registration::{Attendee, AttendeeListing, Purchase, Registration};
pub use ticket::{NewTicket, Ticket};
pub use user::User;
