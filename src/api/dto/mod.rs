//! Data Transfer Objects for REST request/response serialization.
//!
//! Prices are serialized as JSON strings to avoid floating-point rounding.

pub mod event_dto;
pub mod registration_dto;
pub mod ticket_dto;

pub use event_dto::*;
pub use registration_dto::*;
pub use ticket_dto::*;
