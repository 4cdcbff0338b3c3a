// handlers/public/users.rs - PUT /user/:email and GET /admin/:email handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::auth::password::hash_password;
use crate::auth::Role;
use crate::database::models::user::{self, ProfileUpdate, EMAIL_FIELD, PASSWORD_HASH_FIELD};
use crate::database::{Collection, Document, Filter};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// PUT /user/:email - Create or update the profile keyed by email
///
/// Submitted fields are merged into the stored record (`$set` with upsert).
/// A `password` is stored only as a bcrypt hash, and only for an account
/// that has none yet; this route is unauthenticated, so an existing password
/// is never replaced. The response carries the store result and a fresh
/// token for the email.
pub async fn upsert_profile(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(payload): Json<Document>,
) -> ApiResult<Json<Value>> {
    let ProfileUpdate {
        mut fields,
        password,
    } = ProfileUpdate::from_payload(&email, payload)?;

    if let Some(password) = password {
        let existing = state
            .db
            .find_one(Collection::Users, Filter::eq(EMAIL_FIELD, email.as_str()))
            .await?;
        if existing.as_ref().and_then(user::password_hash).is_some() {
            warn!("Refused password replacement for {}", email);
            return Err(ApiError::forbidden("Forbidden Access"));
        }

        let hash = hash_password(password, state.config.security.password_hash_cost).await?;
        fields.insert(PASSWORD_HASH_FIELD.to_string(), Value::String(hash));
    }

    let result = state
        .db
        .update_one(Collection::Users, Filter::eq(EMAIL_FIELD, email.as_str()), fields, true)
        .await?;
    info!(
        "Upserted user {}: matched={} upserted={}",
        email, result.matched_count, result.upserted_count
    );

    let token = state.tokens.issue(email.as_str(), Map::new())?;
    Ok(Json(json!({ "result": result, "token": token })))
}

/// GET /admin/:email - `{ admin: bool }`; unknown users are not admins
pub async fn admin_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    let user = state
        .db
        .find_one(Collection::Users, Filter::eq(EMAIL_FIELD, email.as_str()))
        .await?;

    let admin = user.map(|user| Role::of(&user).is_admin()).unwrap_or(false);
    Ok(Json(json!({ "admin": admin })))
}
