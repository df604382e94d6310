//! Event DTOs for create and update.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::EventDetails;
use crate::error::EventDeskError;

/// Request body for `POST /events` and `PUT /events/{id}`.
///
/// Updates replace every field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EventRequest {
    /// Event title (non-empty).
    pub name: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Start time, `HH:MM:SS`.
    pub time: NaiveTime,
    /// Venue or address.
    #[serde(default)]
    pub location: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl TryFrom<EventRequest> for EventDetails {
    type Error = EventDeskError;

    fn try_from(req: EventRequest) -> Result<Self, Self::Error> {
        Self::new(req.name, req.date, req.time, req.location, req.description)
    }
}
