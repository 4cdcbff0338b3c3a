use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
    pub claims: Claims,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email.clone(),
            claims,
        }
    }
}

/// JWT authentication middleware.
///
/// The request only continues once the token has been verified; the
/// decoded claims are injected as an `AuthUser` extension.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = state.tokens.verify(token).map_err(|e| {
        warn!("Rejected bearer token for {}: {}", request.uri().path(), e);
        ApiError::forbidden("Forbidden access")
    })?;

    debug!("Authenticated {} for {}", claims.email, request.uri().path());
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Second whitespace-separated token of the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("UnAuthorized access"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::forbidden("Forbidden access"))?;

    auth_str
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ApiError::forbidden("Forbidden access"))
}
