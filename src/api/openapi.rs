//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use super::dto::{CreateTicketRequest, EventRequest, RegistrationRequest};
use super::handlers::{events, registrations, reports, system, tickets};
use crate::domain::{AttendeeListing, Event, EventMetrics, Purchase, Ticket};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI specification, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "eventdesk",
        description = "Events, ticket types, attendee registration and sales analytics."
    ),
    paths(
        system::health_handler,
        events::create_event,
        events::list_events,
        events::get_event,
        events::update_event,
        events::delete_event,
        tickets::create_ticket,
        tickets::list_tickets,
        registrations::register_attendee,
        reports::list_attendees,
        reports::dashboard,
    ),
    components(schemas(
        system::HealthResponse,
        EventRequest,
        CreateTicketRequest,
        RegistrationRequest,
        Event,
        Ticket,
        Purchase,
        AttendeeListing,
        EventMetrics,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Service health"),
        (name = "Events", description = "Event management"),
        (name = "Tickets", description = "Ticket types per event"),
        (name = "Registrations", description = "Attendee registration and purchases"),
        (name = "Reports", description = "Attendee listings and dashboards"),
    )
)]
pub struct ApiDoc;
