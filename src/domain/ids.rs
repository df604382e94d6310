//! Type-safe row identifiers.
//!
//! Every table uses a `BIGINT` primary key. Each key is wrapped in its own
//! newtype so that, say, a [`TicketId`] cannot be passed where an
//! [`EventId`] is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw database key.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of an organizer in the `users` table.
    UserId
);
define_id!(
    /// Identifier of a row in the `events` table.
    EventId
);
define_id!(
    /// Identifier of a ticket type in the `tickets` table.
    TicketId
);
define_id!(
    /// Identifier of a row in the `attendees` table.
    AttendeeId
);
define_id!(
    /// Identifier of a row in the `purchases` table.
    PurchaseId
);
