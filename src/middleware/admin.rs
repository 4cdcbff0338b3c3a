use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use super::auth::AuthUser;
use crate::auth::Role;
use crate::database::models::user::EMAIL_FIELD;
use crate::database::{Collection, Filter};
use crate::error::ApiError;
use crate::state::AppState;

/// Middleware that lets the request through only when the caller's own
/// user record carries the admin role. Must run after `jwt_auth_middleware`.
pub async fn require_admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before admin check"))?;

    let requester = state
        .db
        .find_one(Collection::Users, Filter::eq(EMAIL_FIELD, auth_user.email.as_str()))
        .await?;

    let Some(requester) = requester else {
        warn!("Admin check failed: no user record for {}", auth_user.email);
        return Err(ApiError::forbidden("Forbidden Access"));
    };

    if !Role::of(&requester).is_admin() {
        warn!("Admin check failed: {} is not an admin", auth_user.email);
        return Err(ApiError::forbidden("Forbidden Access"));
    }

    debug!("Admin check passed for {}", auth_user.email);
    Ok(next.run(request).await)
}
