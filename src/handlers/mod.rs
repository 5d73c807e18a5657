/// Web API Handlers
///
/// This module contains the handlers for the card endpoints. Each handler
/// extracts what it needs from the request, issues a single repository call,
/// and maps the outcome to an HTTP status and JSON body.

mod card_handlers;

// Re-export all handlers
pub use card_handlers::*;
