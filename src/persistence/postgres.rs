//! PostgreSQL implementation of the store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::Store;
use super::models::{
    AttendeeListingRow, AttendeeRow, CascadeReport, EventRow, MetricsRow, PurchaseRow, TicketRow,
};
use crate::config::AppConfig;
use crate::domain::{
    Attendee, AttendeeListing, Event, EventDetails, EventId, EventMetrics, NewTicket, Purchase,
    Registration, Ticket, User, UserId,
};
use crate::error::EventDeskError;

const EVENT_COLUMNS: &str =
    "event_id, user_id, event_name, event_date, event_time, location, description";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Each operation checks a connection out of the pool for its own
/// duration. Mutations run inside a `sqlx::Transaction`, which rolls back
/// when dropped without a commit.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a lazily connected pool from configuration.
    ///
    /// No connection is opened until the first operation runs.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::Persistence`] if the database URL cannot be
    /// parsed.
    pub fn connect_lazy(config: &AppConfig) -> Result<Self, EventDeskError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect_lazy(&config.database_url)?;
        Ok(Self::new(pool))
    }

    /// Applies pending schema migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns an [`EventDeskError`] if the database is unreachable or a
    /// migration fails.
    pub async fn migrate(&self) -> Result<(), EventDeskError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn ensure_user(&self, user: &User) -> Result<bool, EventDeskError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user.id.get())
                .fetch_one(&mut *tx)
                .await?;
        if exists {
            tx.rollback().await?;
            return Ok(false);
        }

        let inserted = sqlx::query(
            "INSERT INTO users (user_id, name, email, organization) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user.id.get())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.organization)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(inserted > 0)
    }

    async fn create_event(
        &self,
        owner_id: UserId,
        details: &EventDetails,
    ) -> Result<Event, EventDeskError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            "INSERT INTO events (user_id, event_name, event_date, event_time, location, description) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {EVENT_COLUMNS}"
        ))
        .bind(owner_id.get())
        .bind(details.name())
        .bind(details.date())
        .bind(details.time())
        .bind(details.location())
        .bind(details.description())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn get_event(&self, id: EventId) -> Result<Option<Event>, EventDeskError> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Event::from))
    }

    async fn update_event(
        &self,
        id: EventId,
        details: &EventDetails,
    ) -> Result<bool, EventDeskError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE events \
             SET event_name = $1, event_date = $2, event_time = $3, location = $4, description = $5 \
             WHERE event_id = $6",
        )
        .bind(details.name())
        .bind(details.date())
        .bind(details.time())
        .bind(details.location())
        .bind(details.description())
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        Ok(updated > 0)
    }

    async fn delete_event(&self, id: EventId) -> Result<CascadeReport, EventDeskError> {
        let mut tx = self.pool.begin().await?;

        // Purchases, then tickets, then the event: the foreign keys have no
        // ON DELETE CASCADE.
        let purchases = sqlx::query(
            "DELETE FROM purchases \
             WHERE ticket_id IN (SELECT ticket_id FROM tickets WHERE event_id = $1)",
        )
        .bind(id.get())
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let tickets = sqlx::query("DELETE FROM tickets WHERE event_id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let events = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(CascadeReport {
            purchases,
            tickets,
            events,
        })
    }

    async fn create_ticket(
        &self,
        event_id: EventId,
        ticket: &NewTicket,
    ) -> Result<Ticket, EventDeskError> {
        let mut tx = self.pool.begin().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM events WHERE event_id = $1)")
                .bind(event_id.get())
                .fetch_one(&mut *tx)
                .await?;
        if !exists {
            tx.rollback().await?;
            return Err(EventDeskError::EventNotFound(event_id));
        }

        let row = sqlx::query_as::<_, TicketRow>(
            "INSERT INTO tickets (event_id, ticket_type, price, quantity_available) \
             VALUES ($1, $2, $3, $4) \
             RETURNING ticket_id, event_id, ticket_type, price, quantity_available",
        )
        .bind(event_id.get())
        .bind(ticket.ticket_type())
        .bind(ticket.price())
        .bind(ticket.quantity_available())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn register_attendee(
        &self,
        registration: &Registration,
    ) -> Result<Purchase, EventDeskError> {
        let mut tx = self.pool.begin().await?;

        // The no-op update makes RETURNING yield the existing row on conflict.
        let attendee_id: i64 = sqlx::query_scalar(
            "INSERT INTO attendees (name, email) VALUES ($1, $2) \
             ON CONFLICT ((LOWER(email))) DO UPDATE SET email = attendees.email \
             RETURNING attendee_id",
        )
        .bind(registration.name())
        .bind(registration.email())
        .fetch_one(&mut *tx)
        .await?;

        let price: Option<rust_decimal::Decimal> =
            sqlx::query_scalar("SELECT price FROM tickets WHERE ticket_id = $1")
                .bind(registration.ticket_id().get())
                .fetch_optional(&mut *tx)
                .await?;
        let Some(price) = price else {
            tx.rollback().await?;
            return Err(EventDeskError::TicketNotFound(registration.ticket_id()));
        };

        let total_price = registration.total_price(price)?;

        let row = sqlx::query_as::<_, PurchaseRow>(
            "INSERT INTO purchases (attendee_id, ticket_id, quantity_purchased, total_price) \
             VALUES ($1, $2, $3, $4) \
             RETURNING purchase_id, attendee_id, ticket_id, quantity_purchased, total_price, purchase_date",
        )
        .bind(attendee_id)
        .bind(registration.ticket_id().get())
        .bind(registration.quantity())
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn find_attendee(&self, email: &str) -> Result<Option<Attendee>, EventDeskError> {
        let row = sqlx::query_as::<_, AttendeeRow>(
            "SELECT attendee_id, name, email FROM attendees WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Attendee::from))
    }

    async fn list_events(&self) -> Result<Vec<Event>, EventDeskError> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date DESC, event_id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn list_tickets(&self, event_id: EventId) -> Result<Vec<Ticket>, EventDeskError> {
        let rows = sqlx::query_as::<_, TicketRow>(
            "SELECT ticket_id, event_id, ticket_type, price, quantity_available \
             FROM tickets WHERE event_id = $1 ORDER BY ticket_id",
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn list_attendees(
        &self,
        event_id: EventId,
    ) -> Result<Vec<AttendeeListing>, EventDeskError> {
        let rows = sqlx::query_as::<_, AttendeeListingRow>(
            "SELECT a.name, a.email, t.ticket_type, p.quantity_purchased, p.purchase_date \
             FROM purchases p \
             JOIN attendees a ON a.attendee_id = p.attendee_id \
             JOIN tickets t ON t.ticket_id = p.ticket_id \
             WHERE t.event_id = $1 \
             ORDER BY p.purchase_date ASC, p.purchase_id ASC",
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AttendeeListing::from).collect())
    }

    async fn event_metrics(&self, event_id: EventId) -> Result<EventMetrics, EventDeskError> {
        let totals = sqlx::query_as::<_, MetricsRow>(
            "SELECT \
                 COALESCE(SUM(p.quantity_purchased), 0)::BIGINT AS total_tickets_sold, \
                 COALESCE(SUM(p.total_price), 0)::NUMERIC AS total_revenue, \
                 COUNT(DISTINCT p.attendee_id) AS attendee_count, \
                 ROUND(AVG(p.total_price), 2) AS avg_purchase, \
                 MIN(p.total_price) AS min_purchase, \
                 MAX(p.total_price) AS max_purchase \
             FROM purchases p JOIN tickets t ON t.ticket_id = p.ticket_id \
             WHERE t.event_id = $1",
        )
        .bind(event_id.get())
        .fetch_one(&self.pool)
        .await?;

        let by_type = sqlx::query_as::<_, (String, i64)>(
            "SELECT t.ticket_type, SUM(p.quantity_purchased)::BIGINT \
             FROM purchases p JOIN tickets t ON t.ticket_id = p.ticket_id \
             WHERE t.event_id = $1 \
             GROUP BY t.ticket_type",
        )
        .bind(event_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(EventMetrics {
            total_tickets_sold: totals.total_tickets_sold,
            total_revenue: totals.total_revenue,
            attendee_count: totals.attendee_count,
            tickets_by_type: by_type.into_iter().collect(),
            avg_purchase: totals.avg_purchase,
            min_purchase: totals.min_purchase,
            max_purchase: totals.max_purchase,
        })
    }
}
