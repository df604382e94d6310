//! Event service: validated operations over a [`Store`].

use std::sync::Arc;

use crate::domain::{
    Attendee, AttendeeListing, Event, EventDetails, EventId, EventMetrics, NewTicket, Purchase,
    Registration, Ticket, User, UserId,
};
use crate::error::EventDeskError;
use crate::persistence::{CascadeReport, Store};

/// Orchestration layer for events, tickets and registrations.
///
/// Stateless coordinator over a shared [`Store`]. Inputs arrive already
/// validated as domain types; each mutation is a single store transaction
/// and is logged once it commits.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<dyn Store>,
}

impl EventService {
    /// Creates a new `EventService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Seeds the organizer that owns events. Safe to call on every start.
    ///
    /// Returns `true` if the user was created by this call.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] if the store fails.
    pub async fn ensure_default_user(&self, user: &User) -> Result<bool, EventDeskError> {
        let created = self.store.ensure_user(user).await?;
        if created {
            tracing::info!(user_id = %user.id, "default user created");
        } else {
            tracing::debug!(user_id = %user.id, "default user already present");
        }
        Ok(created)
    }

    /// Creates an event owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::ConstraintViolation`] if the owner does not
    /// exist, or another [`EventDeskError`] on store failure.
    pub async fn create_event(
        &self,
        owner_id: UserId,
        details: &EventDetails,
    ) -> Result<Event, EventDeskError> {
        let event = self.store.create_event(owner_id, details).await?;
        tracing::info!(event_id = %event.id, %owner_id, name = %event.name, "event created");
        Ok(event)
    }

    /// Fetches one event.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::EventNotFound`] if no such event exists.
    pub async fn get_event(&self, id: EventId) -> Result<Event, EventDeskError> {
        self.store
            .get_event(id)
            .await?
            .ok_or(EventDeskError::EventNotFound(id))
    }

    /// Replaces the editable fields of an event.
    ///
    /// Returns `false` when no event has the given id; nothing is written in
    /// that case.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] on store failure.
    pub async fn update_event(
        &self,
        id: EventId,
        details: &EventDetails,
    ) -> Result<bool, EventDeskError> {
        let matched = self.store.update_event(id, details).await?;
        if matched {
            tracing::info!(event_id = %id, "event updated");
        } else {
            tracing::warn!(event_id = %id, "update matched no event");
        }
        Ok(matched)
    }

    /// Deletes an event with its tickets and their purchases.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] on store failure; nothing is deleted
    /// in that case.
    pub async fn delete_event(&self, id: EventId) -> Result<CascadeReport, EventDeskError> {
        let report = self.store.delete_event(id).await?;
        tracing::info!(
            event_id = %id,
            purchases = report.purchases,
            tickets = report.tickets,
            events = report.events,
            "event deleted"
        );
        Ok(report)
    }

    /// Adds a ticket type to an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::EventNotFound`] if the event does not
    /// exist, or another [`EventDeskError`] on store failure.
    pub async fn create_ticket_type(
        &self,
        event_id: EventId,
        ticket: &NewTicket,
    ) -> Result<Ticket, EventDeskError> {
        let ticket = self.store.create_ticket(event_id, ticket).await?;
        tracing::info!(
            %event_id,
            ticket_id = %ticket.id,
            ticket_type = %ticket.ticket_type,
            price = %ticket.price,
            "ticket type created"
        );
        Ok(ticket)
    }

    /// Registers an attendee and records the purchase.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::TicketNotFound`] if the ticket does not
    /// exist (no attendee row is kept), or another [`EventDeskError`] on
    /// store failure.
    pub async fn register_attendee(
        &self,
        registration: &Registration,
    ) -> Result<Purchase, EventDeskError> {
        let purchase = self.store.register_attendee(registration).await?;
        tracing::info!(
            purchase_id = %purchase.id,
            attendee_id = %purchase.attendee_id,
            ticket_id = %purchase.ticket_id,
            quantity = purchase.quantity_purchased,
            total = %purchase.total_price,
            "attendee registered"
        );
        Ok(purchase)
    }

    /// Looks up an attendee by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] on store failure.
    pub async fn find_attendee(&self, email: &str) -> Result<Option<Attendee>, EventDeskError> {
        self.store.find_attendee(email.trim()).await
    }

    /// Lists all events, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] on store failure.
    pub async fn list_events(&self) -> Result<Vec<Event>, EventDeskError> {
        self.store.list_events().await
    }

    /// Lists the ticket types of one event.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] on store failure.
    pub async fn list_ticket_types(&self, event_id: EventId) -> Result<Vec<Ticket>, EventDeskError> {
        self.store.list_tickets(event_id).await
    }

    /// Lists an event's purchases with attendee details, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] on store failure.
    pub async fn list_attendees(
        &self,
        event_id: EventId,
    ) -> Result<Vec<AttendeeListing>, EventDeskError> {
        self.store.list_attendees(event_id).await
    }

    /// Computes the sales dashboard for one event.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] on store failure. An event without
    /// purchases is not an error.
    pub async fn dashboard(&self, event_id: EventId) -> Result<EventMetrics, EventDeskError> {
        self.store.event_metrics(event_id).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::persistence::MemoryStore;

    const OWNER: UserId = UserId::new(1);

    async fn make_service() -> EventService {
        let service = EventService::new(Arc::new(MemoryStore::new()));
        let admin = User::new(OWNER, "Admin User", "admin@example.com", "Event Management");
        let Ok(_) = service.ensure_default_user(&admin).await else {
            panic!("seed failed");
        };
        service
    }

    fn details(name: &str, date: &str) -> EventDetails {
        let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
            panic!("valid date");
        };
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default();
        let Ok(details) = EventDetails::new(name, date, time, "Conference Hall A", "Keynotes")
        else {
            panic!("valid details");
        };
        details
    }

    async fn create_event(service: &EventService, name: &str, date: &str) -> Event {
        let Ok(event) = service.create_event(OWNER, &details(name, date)).await else {
            panic!("event creation failed");
        };
        event
    }

    async fn create_ticket(
        service: &EventService,
        event_id: EventId,
        label: &str,
        price: Decimal,
    ) -> Ticket {
        let Ok(new) = NewTicket::new(label, price, 100) else {
            panic!("valid ticket");
        };
        let Ok(ticket) = service.create_ticket_type(event_id, &new).await else {
            panic!("ticket creation failed");
        };
        ticket
    }

    async fn register(
        service: &EventService,
        name: &str,
        email: &str,
        ticket: &Ticket,
        qty: i32,
    ) -> Purchase {
        let Ok(reg) = Registration::new(name, email, ticket.id, qty) else {
            panic!("valid registration");
        };
        let Ok(purchase) = service.register_attendee(&reg).await else {
            panic!("registration failed");
        };
        purchase
    }

    #[tokio::test]
    async fn create_event_adds_exactly_one_row() {
        let service = make_service().await;
        let Ok(before) = service.list_events().await else {
            panic!("list failed");
        };

        let event = create_event(&service, "Tech Summit", "2025-01-01").await;

        let Ok(after) = service.list_events().await else {
            panic!("list failed");
        };
        assert_eq!(after.len(), before.len() + 1);
        let Some(listed) = after.iter().find(|e| e.id == event.id) else {
            panic!("created event missing from listing");
        };
        assert_eq!(listed.name, "Tech Summit");
        assert_eq!(listed.location, "Conference Hall A");
        assert_eq!(listed.description, "Keynotes");
        assert_eq!(listed.owner_id, OWNER);
    }

    #[tokio::test]
    async fn tech_summit_dashboard() {
        let service = make_service().await;
        let event = create_event(&service, "Tech Summit", "2025-01-01").await;
        let general = create_ticket(&service, event.id, "General", dec!(50.00)).await;
        let _ = register(&service, "Ann", "ann@x.com", &general, 2).await;

        let Ok(metrics) = service.dashboard(event.id).await else {
            panic!("dashboard failed");
        };
        assert_eq!(metrics.total_tickets_sold, 2);
        assert_eq!(metrics.total_revenue, dec!(100.00));
        assert_eq!(metrics.attendee_count, 1);
        assert_eq!(metrics.tickets_by_type.len(), 1);
        assert_eq!(metrics.tickets_by_type.get("General"), Some(&2));
        assert_eq!(metrics.avg_purchase, Some(dec!(100.00)));
        assert_eq!(metrics.min_purchase, Some(dec!(100.00)));
        assert_eq!(metrics.max_purchase, Some(dec!(100.00)));
    }

    #[tokio::test]
    async fn dashboard_without_purchases_is_zeroed() {
        let service = make_service().await;
        let event = create_event(&service, "Quiet Night", "2025-02-01").await;
        let _ = create_ticket(&service, event.id, "General", dec!(10.00)).await;

        let Ok(metrics) = service.dashboard(event.id).await else {
            panic!("dashboard failed");
        };
        assert_eq!(metrics, EventMetrics::default());
    }

    #[tokio::test]
    async fn total_price_is_derived_from_ticket_price() {
        let service = make_service().await;
        let event = create_event(&service, "Gala", "2025-03-01").await;
        let vip = create_ticket(&service, event.id, "VIP", dec!(37.25)).await;

        let purchase = register(&service, "Bo", "bo@x.com", &vip, 3).await;
        assert_eq!(purchase.total_price, dec!(111.75));
        assert_eq!(purchase.quantity_purchased, 3);
        assert_eq!(purchase.ticket_id, vip.id);
    }

    #[tokio::test]
    async fn repeat_email_resolves_to_same_attendee() {
        let service = make_service().await;
        let event = create_event(&service, "Tech Summit", "2025-01-01").await;
        let general = create_ticket(&service, event.id, "General", dec!(50.00)).await;

        let first = register(&service, "Ann", "ann@x.com", &general, 1).await;
        let second = register(&service, "Ann B.", "ann@x.com", &general, 1).await;
        assert_eq!(first.attendee_id, second.attendee_id);

        let Ok(metrics) = service.dashboard(event.id).await else {
            panic!("dashboard failed");
        };
        assert_eq!(metrics.attendee_count, 1);
        assert_eq!(metrics.total_tickets_sold, 2);

        let Ok(Some(attendee)) = service.find_attendee("Ann@X.com").await else {
            panic!("attendee missing");
        };
        assert_eq!(attendee.name, "Ann");
    }

    #[tokio::test]
    async fn registration_for_missing_ticket_keeps_no_attendee() {
        let service = make_service().await;
        let Ok(reg) = Registration::new("Ghost", "ghost@x.com", crate::domain::TicketId::new(99), 1)
        else {
            panic!("valid registration");
        };
        let result = service.register_attendee(&reg).await;
        assert!(matches!(result, Err(EventDeskError::TicketNotFound(_))));

        let Ok(found) = service.find_attendee("ghost@x.com").await else {
            panic!("lookup failed");
        };
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_event_leaves_no_orphans() {
        let service = make_service().await;
        let event = create_event(&service, "Tech Summit", "2025-01-01").await;
        let general = create_ticket(&service, event.id, "General", dec!(50.00)).await;
        let _ = register(&service, "Ann", "ann@x.com", &general, 2).await;

        let Ok(report) = service.delete_event(event.id).await else {
            panic!("delete failed");
        };
        assert_eq!(report.events, 1);

        assert!(matches!(service.list_ticket_types(event.id).await, Ok(t) if t.is_empty()));
        assert!(matches!(service.list_attendees(event.id).await, Ok(a) if a.is_empty()));
        assert!(
            matches!(service.dashboard(event.id).await, Ok(m) if m == EventMetrics::default())
        );
        assert!(matches!(
            service.get_event(event.id).await,
            Err(EventDeskError::EventNotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let service = make_service().await;
        let event = create_event(&service, "Draft", "2025-01-01").await;

        let Ok(matched) = service
            .update_event(event.id, &details("Final", "2025-06-30"))
            .await
        else {
            panic!("update failed");
        };
        assert!(matched);

        let Ok(updated) = service.get_event(event.id).await else {
            panic!("event missing");
        };
        assert_eq!(updated.name, "Final");
        assert_eq!(updated.date.to_string(), "2025-06-30");
        assert_eq!(updated.owner_id, OWNER);
    }

    #[tokio::test]
    async fn attendees_listed_in_purchase_order() {
        let service = make_service().await;
        let event = create_event(&service, "Tech Summit", "2025-01-01").await;
        let general = create_ticket(&service, event.id, "General", dec!(50.00)).await;
        let vip = create_ticket(&service, event.id, "VIP", dec!(150.00)).await;

        let _ = register(&service, "Ann", "ann@x.com", &general, 2).await;
        let _ = register(&service, "Bob", "bob@x.com", &vip, 1).await;
        let _ = register(&service, "Cy", "cy@x.com", &general, 1).await;

        let Ok(listing) = service.list_attendees(event.id).await else {
            panic!("listing failed");
        };
        let names: Vec<&str> = listing.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Ann", "Bob", "Cy"]);
        assert!(
            listing
                .windows(2)
                .all(|w| matches!(w, [a, b] if a.purchased_at <= b.purchased_at))
        );
        assert_eq!(listing.get(1).map(|l| l.ticket_type.as_str()), Some("VIP"));
    }

    #[tokio::test]
    async fn breakdown_groups_by_ticket_type() {
        let service = make_service().await;
        let event = create_event(&service, "Festival", "2025-08-01").await;
        let general = create_ticket(&service, event.id, "General", dec!(20.00)).await;
        let vip = create_ticket(&service, event.id, "VIP", dec!(80.00)).await;

        let _ = register(&service, "Ann", "ann@x.com", &general, 3).await;
        let _ = register(&service, "Bob", "bob@x.com", &vip, 1).await;
        let _ = register(&service, "Ann", "ann@x.com", &vip, 2).await;

        let Ok(metrics) = service.dashboard(event.id).await else {
            panic!("dashboard failed");
        };
        assert_eq!(metrics.total_tickets_sold, 6);
        assert_eq!(metrics.total_revenue, dec!(300.00));
        assert_eq!(metrics.attendee_count, 2);
        assert_eq!(metrics.tickets_by_type.get("General"), Some(&3));
        assert_eq!(metrics.tickets_by_type.get("VIP"), Some(&3));
        assert_eq!(metrics.min_purchase, Some(dec!(60.00)));
        assert_eq!(metrics.max_purchase, Some(dec!(160.00)));
        assert_eq!(metrics.avg_purchase, Some(dec!(100.00)));
    }

    #[tokio::test]
    async fn events_of_other_dashboards_do_not_leak() {
        let service = make_service().await;
        let a = create_event(&service, "A", "2025-01-01").await;
        let b = create_event(&service, "B", "2025-01-02").await;
        let ticket_a = create_ticket(&service, a.id, "General", dec!(5.00)).await;
        let _ = create_ticket(&service, b.id, "General", dec!(5.00)).await;
        let _ = register(&service, "Ann", "ann@x.com", &ticket_a, 1).await;

        let Ok(metrics) = service.dashboard(b.id).await else {
            panic!("dashboard failed");
        };
        assert_eq!(metrics.total_tickets_sold, 0);
        assert!(metrics.tickets_by_type.is_empty());
    }
}
