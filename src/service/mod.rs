//! Service layer: business operations over the store.
//!
//! [`EventService`] is the typed API used by the REST handlers: every
//! operation returns a `Result`. [`EventDesk`] wraps it in the
//! presentation-facing contract where failures are logged and collapse to
//! `false`, an empty list, or `None`.

pub mod desk;
pub mod event_service;

pub use desk::EventDesk;
pub use event_service::EventService;
