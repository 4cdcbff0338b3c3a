// handlers/public/login.rs - POST /login handler

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::password::verify_password;
use crate::database::models::user::{self, LoginRequest, EMAIL_FIELD};
use crate::database::{Collection, Document, Filter};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /login - Exchange credentials for a bearer token
///
/// Expected Input:
/// ```json
/// { "email": "user@example.com", "password": "string", "...": "extra claims" }
/// ```
///
/// Expected Output:
/// ```json
/// { "accessToken": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// The password is checked against the stored bcrypt hash. Unknown users and
/// wrong passwords get the same 401 so accounts cannot be probed.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Document>,
) -> ApiResult<Json<Value>> {
    let credentials = LoginRequest::from_payload(payload)?;

    let account = state
        .db
        .find_one(Collection::Users, Filter::eq(EMAIL_FIELD, credentials.email.as_str()))
        .await?;

    let Some(hash) = account.as_ref().and_then(user::password_hash) else {
        warn!("Login rejected for {}: no password on record", credentials.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !verify_password(credentials.password, hash.to_string()).await? {
        warn!("Login rejected for {}: wrong password", credentials.email);
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let access_token = state.tokens.issue(credentials.email.as_str(), credentials.claims)?;
    info!("Issued access token for {}", credentials.email);

    Ok(Json(json!({ "accessToken": access_token })))
}
