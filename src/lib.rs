//! # eventdesk
//!
//! Event management service: organizers create events, define ticket
//! types, register attendees, and read sales analytics from PostgreSQL.
//!
//! The core is the consistency and aggregation layer. Every multi-statement
//! write (registration, cascading delete) is one transaction, purchase
//! totals are always derived from the ticket's current price, and the
//! dashboard treats an event without purchases as zeroes rather than an
//! error.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)              Form-driven front end
//!     │                             │
//!     ├── REST Handlers (api/)      ├── EventDesk (service/)
//!     │                             │
//!     └──────────── EventService (service/) ────────────┘
//!                        │
//!                  Store trait (persistence/)
//!                   ├── PostgresStore (sqlx::PgPool)
//!                   └── MemoryStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the HTTP application around a shared state.
pub fn build_app(state: AppState) -> Router {
    let router = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
        )
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Convenience constructor for [`AppState`] over any store.
#[must_use]
pub fn build_state(store: Arc<dyn persistence::Store>, owner_id: domain::UserId) -> AppState {
    AppState {
        event_service: Arc::new(service::EventService::new(store)),
        owner_id,
    }
}
