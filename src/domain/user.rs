//! Organizer accounts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// An organizer row from the `users` table.
///
/// The service runs with a single implicit organizer, seeded at startup by
/// [`crate::service::EventService::ensure_default_user`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Primary key, chosen by the caller rather than generated.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Organization the user acts for.
    pub organization: String,
}

impl User {
    /// Creates a user record.
    #[must_use]
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            organization: organization.into(),
        }
    }
}
