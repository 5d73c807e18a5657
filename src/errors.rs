use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

/// Message for create requests carrying invalid card data
pub const INVALID_CARD_DATA: &str = "invalid data supplied when creating the card";

/// Message for delete requests carrying a malformed card ID
pub const INVALID_DELETE_ID: &str = "invalid card id supplied when deleting the card";

/// Message for like requests carrying a malformed card ID
pub const INVALID_LIKE_DATA: &str = "invalid data supplied for adding a like";

/// Message for unlike requests carrying a malformed card ID
pub const INVALID_UNLIKE_DATA: &str = "invalid data supplied for removing a like";

/// Message for delete requests naming a card that does not exist
pub const CARD_NOT_FOUND: &str = "card not found";

/// Message for like/unlike requests naming a card that does not exist
pub const NONEXISTENT_CARD_ID: &str = "nonexistent card id supplied";

/// Message sent when the identification header is missing
pub const AUTH_REQUIRED: &str = "authorization required";

/// Message sent for any server-side failure
pub const SERVER_ERROR: &str = "server-side error";

/// The errors surfaced to API clients
///
/// Every variant maps to exactly one status code, and the response body is
/// always `{ "message": <string> }`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request carried data that failed validation (400)
    #[error("{0}")]
    Validation(&'static str),

    /// The referenced card does not exist (404)
    #[error("{0}")]
    NotFound(&'static str),

    /// The request did not identify an acting user (401)
    #[error("{}", AUTH_REQUIRED)]
    Unauthorized,

    /// A store failure (500); the cause is logged, never sent to the client
    #[error("{}", SERVER_ERROR)]
    Database(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, AUTH_REQUIRED),
            ApiError::Database(err) => {
                error!("Database error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
            }
        };

        let body = Json(serde_json::json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

/// A request body axum could not deserialize is a validation failure, not a
/// server error; the default 422 would leak through otherwise.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::Validation(INVALID_CARD_DATA)
    }
}
