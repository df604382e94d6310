//! In-process implementation of the store.
//!
//! [`MemoryStore`] mirrors the PostgreSQL schema: keys come from per-table
//! sequences, foreign keys and the unique attendee email are checked on
//! every write, and each mutation runs against a draft copy of the tables
//! that replaces the live copy only when the whole operation succeeded.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::Store;
use super::models::CascadeReport;
use crate::domain::registration::email_key;
use crate::domain::{
    Attendee, AttendeeId, AttendeeListing, Event, EventDetails, EventId, EventMetrics,
    MetricsAccumulator, NewTicket, Purchase, PurchaseId, Registration, Ticket, TicketId, User,
    UserId,
};
use crate::error::EventDeskError;

#[derive(Debug, Clone, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    events: BTreeMap<EventId, Event>,
    tickets: BTreeMap<TicketId, Ticket>,
    attendees: BTreeMap<AttendeeId, Attendee>,
    purchases: BTreeMap<PurchaseId, Purchase>,
    sequences: Sequences,
}

#[derive(Debug, Clone, Default)]
struct Sequences {
    event: i64,
    ticket: i64,
    attendee: i64,
    purchase: i64,
}

fn next(seq: &mut i64) -> i64 {
    *seq = seq.saturating_add(1);
    *seq
}

impl Tables {
    fn attendee_by_email(&self, email: &str) -> Option<&Attendee> {
        let key = email_key(email);
        self.attendees.values().find(|a| email_key(&a.email) == key)
    }

    fn event_ticket_ids(&self, event_id: EventId) -> Vec<TicketId> {
        self.tickets
            .values()
            .filter(|t| t.event_id == event_id)
            .map(|t| t.id)
            .collect()
    }
}

/// Store kept entirely in memory.
///
/// All operations are serialized behind one [`tokio::sync::Mutex`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `op` against a draft of the tables and publishes the draft only
    /// if `op` succeeds.
    async fn transact<T, F>(&self, op: F) -> Result<T, EventDeskError>
    where
        F: FnOnce(&mut Tables) -> Result<T, EventDeskError> + Send,
    {
        let mut live = self.tables.lock().await;
        let mut draft = live.clone();
        let out = op(&mut draft)?;
        *live = draft;
        Ok(out)
    }

    /// Number of attendee rows.
    pub async fn attendee_count(&self) -> usize {
        self.tables.lock().await.attendees.len()
    }

    /// Number of purchase rows across all events.
    pub async fn purchase_count(&self) -> usize {
        self.tables.lock().await.purchases.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_user(&self, user: &User) -> Result<bool, EventDeskError> {
        self.transact(|tables| {
            if tables.users.contains_key(&user.id) {
                return Ok(false);
            }
            tables.users.insert(user.id, user.clone());
            Ok(true)
        })
        .await
    }

    async fn create_event(
        &self,
        owner_id: UserId,
        details: &EventDetails,
    ) -> Result<Event, EventDeskError> {
        self.transact(|tables| {
            if !tables.users.contains_key(&owner_id) {
                return Err(EventDeskError::ConstraintViolation(format!(
                    "event owner {owner_id} does not exist"
                )));
            }
            let id = EventId::new(next(&mut tables.sequences.event));
            let event = Event::from_details(id, owner_id, details.clone());
            tables.events.insert(id, event.clone());
            Ok(event)
        })
        .await
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, EventDeskError> {
        Ok(self.tables.lock().await.events.get(&id).cloned())
    }

    async fn update_event(
        &self,
        id: EventId,
        details: &EventDetails,
    ) -> Result<bool, EventDeskError> {
        self.transact(|tables| {
            let Some(event) = tables.events.get_mut(&id) else {
                return Ok(false);
            };
            *event = Event::from_details(id, event.owner_id, details.clone());
            Ok(true)
        })
        .await
    }

    async fn delete_event(&self, id: EventId) -> Result<CascadeReport, EventDeskError> {
        self.transact(|tables| {
            let ticket_ids = tables.event_ticket_ids(id);

            let before = tables.purchases.len();
            tables
                .purchases
                .retain(|_, p| !ticket_ids.contains(&p.ticket_id));
            let purchases = before.saturating_sub(tables.purchases.len());

            let before = tables.tickets.len();
            tables.tickets.retain(|_, t| t.event_id != id);
            let tickets = before.saturating_sub(tables.tickets.len());

            let events = usize::from(tables.events.remove(&id).is_some());

            Ok(CascadeReport {
                purchases: purchases as u64,
                tickets: tickets as u64,
                events: events as u64,
            })
        })
        .await
    }

    async fn create_ticket(
        &self,
        event_id: EventId,
        ticket: &NewTicket,
    ) -> Result<Ticket, EventDeskError> {
        self.transact(|tables| {
            if !tables.events.contains_key(&event_id) {
                return Err(EventDeskError::EventNotFound(event_id));
            }
            let id = TicketId::new(next(&mut tables.sequences.ticket));
            let row = ticket.clone().into_ticket(id, event_id);
            tables.tickets.insert(id, row.clone());
            Ok(row)
        })
        .await
    }

    async fn register_attendee(
        &self,
        registration: &Registration,
    ) -> Result<Purchase, EventDeskError> {
        self.transact(|tables| {
            let attendee_id = match tables.attendee_by_email(registration.email()) {
                Some(existing) => existing.id,
                None => {
                    let id = AttendeeId::new(next(&mut tables.sequences.attendee));
                    tables.attendees.insert(
                        id,
                        Attendee {
                            id,
                            name: registration.name().to_string(),
                            email: registration.email().to_string(),
                        },
                    );
                    id
                }
            };

            let price = tables
                .tickets
                .get(&registration.ticket_id())
                .map(|t| t.price)
                .ok_or(EventDeskError::TicketNotFound(registration.ticket_id()))?;
            let total_price = registration.total_price(price)?;

            let id = PurchaseId::new(next(&mut tables.sequences.purchase));
            let purchase = Purchase {
                id,
                attendee_id,
                ticket_id: registration.ticket_id(),
                quantity_purchased: registration.quantity(),
                total_price,
                purchased_at: Utc::now(),
            };
            tables.purchases.insert(id, purchase.clone());
            Ok(purchase)
        })
        .await
    }

    async fn find_attendee(&self, email: &str) -> Result<Option<Attendee>, EventDeskError> {
        Ok(self.tables.lock().await.attendee_by_email(email).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventDeskError> {
        let tables = self.tables.lock().await;
        let mut events: Vec<Event> = tables.events.values().cloned().collect();
        events.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(events)
    }

    async fn list_tickets(&self, event_id: EventId) -> Result<Vec<Ticket>, EventDeskError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .tickets
            .values()
            .filter(|t| t.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_attendees(
        &self,
        event_id: EventId,
    ) -> Result<Vec<AttendeeListing>, EventDeskError> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<(&Purchase, AttendeeListing)> = tables
            .purchases
            .values()
            .filter_map(|p| {
                let ticket = tables.tickets.get(&p.ticket_id)?;
                if ticket.event_id != event_id {
                    return None;
                }
                let attendee = tables.attendees.get(&p.attendee_id)?;
                Some((
                    p,
                    AttendeeListing {
                        name: attendee.name.clone(),
                        email: attendee.email.clone(),
                        ticket_type: ticket.ticket_type.clone(),
                        quantity_purchased: p.quantity_purchased,
                        purchased_at: p.purchased_at,
                    },
                ))
            })
            .collect();
        rows.sort_by(|(a, _), (b, _)| {
            a.purchased_at
                .cmp(&b.purchased_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows.into_iter().map(|(_, listing)| listing).collect())
    }

    async fn event_metrics(&self, event_id: EventId) -> Result<EventMetrics, EventDeskError> {
        let tables = self.tables.lock().await;
        let mut acc = MetricsAccumulator::new();
        for purchase in tables.purchases.values() {
            let Some(ticket) = tables.tickets.get(&purchase.ticket_id) else {
                continue;
            };
            if ticket.event_id == event_id {
                acc.record(
                    purchase.attendee_id,
                    &ticket.ticket_type,
                    purchase.quantity_purchased,
                    purchase.total_price,
                );
            }
        }
        Ok(acc.finish())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    use super::*;

    fn details(name: &str, y: i32, m: u32, d: u32) -> EventDetails {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let time = NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default();
        let Ok(details) = EventDetails::new(name, date, time, "Hall A", "") else {
            panic!("valid details");
        };
        details
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        let admin = User::new(UserId::new(1), "Admin User", "admin@example.com", "Org");
        let Ok(true) = store.ensure_user(&admin).await else {
            panic!("seed failed");
        };
        store
    }

    async fn event_with_ticket(store: &MemoryStore) -> (EventId, TicketId) {
        let Ok(event) = store
            .create_event(UserId::new(1), &details("Tech Summit", 2025, 1, 1))
            .await
        else {
            panic!("event creation failed");
        };
        let Ok(new) = NewTicket::new("General", dec!(50.00), 100) else {
            panic!("valid ticket");
        };
        let Ok(ticket) = store.create_ticket(event.id, &new).await else {
            panic!("ticket creation failed");
        };
        (event.id, ticket.id)
    }

    fn registration(email: &str, ticket_id: TicketId, qty: i32) -> Registration {
        let Ok(reg) = Registration::new("Ann", email, ticket_id, qty) else {
            panic!("valid registration");
        };
        reg
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let store = seeded().await;
        let admin = User::new(UserId::new(1), "Someone Else", "x@example.com", "Org");
        let result = store.ensure_user(&admin).await;
        assert!(matches!(result, Ok(false)));
    }

    #[tokio::test]
    async fn event_requires_existing_owner() {
        let store = MemoryStore::new();
        let result = store
            .create_event(UserId::new(1), &details("Orphan", 2025, 1, 1))
            .await;
        assert!(matches!(result, Err(EventDeskError::ConstraintViolation(_))));
        assert!(matches!(store.list_events().await, Ok(events) if events.is_empty()));
    }

    #[tokio::test]
    async fn ticket_requires_existing_event() {
        let store = seeded().await;
        let Ok(new) = NewTicket::new("General", dec!(10.00), 1) else {
            panic!("valid ticket");
        };
        let result = store.create_ticket(EventId::new(99), &new).await;
        assert!(matches!(result, Err(EventDeskError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn failed_registration_leaves_no_attendee() {
        let store = seeded().await;
        let result = store
            .register_attendee(&registration("ann@x.com", TicketId::new(404), 1))
            .await;
        assert!(matches!(result, Err(EventDeskError::TicketNotFound(_))));
        assert_eq!(store.attendee_count().await, 0);
        assert_eq!(store.purchase_count().await, 0);
    }

    #[tokio::test]
    async fn same_email_reuses_attendee() {
        let store = seeded().await;
        let (event_id, ticket_id) = event_with_ticket(&store).await;

        let Ok(first) = store
            .register_attendee(&registration("Ann@X.com", ticket_id, 1))
            .await
        else {
            panic!("registration failed");
        };
        let Ok(second) = store
            .register_attendee(&registration("ANN@x.com", ticket_id, 3))
            .await
        else {
            panic!("registration failed");
        };

        assert_eq!(first.attendee_id, second.attendee_id);
        assert_eq!(store.attendee_count().await, 1);
        assert_eq!(second.total_price, dec!(150.00));

        let Ok(listing) = store.list_attendees(event_id).await else {
            panic!("listing failed");
        };
        let emails: Vec<&str> = listing.iter().map(|l| l.email.as_str()).collect();
        assert_eq!(emails, ["Ann@X.com", "Ann@X.com"]);
    }

    #[tokio::test]
    async fn delete_cascades_in_one_step() {
        let store = seeded().await;
        let (event_id, ticket_id) = event_with_ticket(&store).await;
        let _ = store
            .register_attendee(&registration("ann@x.com", ticket_id, 2))
            .await;
        let _ = store
            .register_attendee(&registration("bob@x.com", ticket_id, 1))
            .await;

        let Ok(report) = store.delete_event(event_id).await else {
            panic!("delete failed");
        };
        assert_eq!(
            report,
            CascadeReport {
                purchases: 2,
                tickets: 1,
                events: 1
            }
        );
        assert_eq!(store.purchase_count().await, 0);
        // Attendees outlive the events they bought tickets for.
        assert_eq!(store.attendee_count().await, 2);
    }

    #[tokio::test]
    async fn delete_leaves_other_events_alone() {
        let store = seeded().await;
        let (doomed, doomed_ticket) = event_with_ticket(&store).await;
        let (kept, kept_ticket) = event_with_ticket(&store).await;
        let _ = store
            .register_attendee(&registration("ann@x.com", doomed_ticket, 1))
            .await;
        let _ = store
            .register_attendee(&registration("ann@x.com", kept_ticket, 4))
            .await;

        let _ = store.delete_event(doomed).await;

        let Ok(metrics) = store.event_metrics(kept).await else {
            panic!("metrics failed");
        };
        assert_eq!(metrics.total_tickets_sold, 4);
        assert!(matches!(store.list_tickets(kept).await, Ok(t) if t.len() == 1));
    }

    #[tokio::test]
    async fn update_missing_event_reports_no_match() {
        let store = seeded().await;
        let result = store
            .update_event(EventId::new(7), &details("Ghost", 2025, 1, 1))
            .await;
        assert!(matches!(result, Ok(false)));
    }

    #[tokio::test]
    async fn list_events_newest_date_first() {
        let store = seeded().await;
        for (name, month) in [("Spring", 3), ("Winter", 1), ("Summer", 7)] {
            let _ = store
                .create_event(UserId::new(1), &details(name, 2025, month, 1))
                .await;
        }
        let Ok(events) = store.list_events().await else {
            panic!("list failed");
        };
        let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Summer", "Spring", "Winter"]);
    }
}
