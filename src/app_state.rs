//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::UserId;
use crate::service::EventService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event service for all business logic.
    pub event_service: Arc<EventService>,
    /// Organizer that owns events created through the API.
    pub owner_id: UserId,
}
