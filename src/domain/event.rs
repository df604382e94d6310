//! Events and their editable details.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EventId, UserId};
use crate::error::EventDeskError;

/// An event row from the `events` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Primary key.
    pub id: EventId,
    /// Organizer that owns the event.
    pub owner_id: UserId,
    /// Event title.
    pub name: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time (local, no zone).
    pub time: NaiveTime,
    /// Venue or address.
    pub location: String,
    /// Free-form description.
    pub description: String,
}

impl Event {
    /// Builds an event from its key, owner and details.
    #[must_use]
    pub fn from_details(id: EventId, owner_id: UserId, details: EventDetails) -> Self {
        Self {
            id,
            owner_id,
            name: details.name,
            date: details.date,
            time: details.time,
            location: details.location,
            description: details.description,
        }
    }
}

/// The caller-editable columns of an event, validated on construction.
///
/// Used both for creation and for the full-row replace performed by
/// `update_event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    name: String,
    date: NaiveDate,
    time: NaiveTime,
    location: String,
    description: String,
}

impl EventDetails {
    /// Validates and builds event details.
    ///
    /// The name is trimmed and must not be empty.
    ///
    /// # Errors
    ///
    /// Returns [`EventDeskError::Validation`] if the name is blank.
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, EventDeskError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(EventDeskError::Validation(
                "event name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            name,
            date,
            time,
            location: location.into(),
            description: description.into(),
        })
    }

    /// Event title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Start time.
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Venue or address.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
