use axum::{extract::Request, middleware::Next, response::Response};
use tracing::debug;

use crate::errors::ApiError;

/// Name of the request header carrying the acting user's ID
pub const USER_ID_HEADER: &str = "x-user-id";

/// The identified acting user, attached to every authenticated request
///
/// Handlers receive this through `Extension<AuthUser>`; it is only ever
/// constructed by [`identify_user`] (and by tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(String);

impl AuthUser {
    /// Creates an identified user from a raw ID
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// The user's ID
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Middleware that identifies the acting user
///
/// Reads [`USER_ID_HEADER`] and attaches its value as an [`AuthUser`]
/// extension. Requests without the header (or with an empty value) are
/// rejected with 401 before any handler runs. The value is trusted as-is;
/// credential checking is out of scope for this service.
pub async fn identify_user(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    let user_id = match user_id {
        Some(user_id) => user_id,
        None => {
            debug!("Request without a usable {} header", USER_ID_HEADER);
            return Err(ApiError::Unauthorized);
        }
    };

    request.extensions_mut().insert(AuthUser::new(user_id));

    Ok(next.run(request).await)
}
