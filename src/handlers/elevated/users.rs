// handlers/elevated/users.rs - PUT /user/admin/:email handler

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;
use tracing::info;

use crate::auth::Role;
use crate::database::models::user::{EMAIL_FIELD, ROLE_FIELD};
use crate::database::{Collection, Document, Filter, UpdateOutcome};
use crate::error::ApiResult;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// PUT /user/admin/:email - Grant the admin role to an existing user.
///
/// Does not upsert: an unknown email yields `matchedCount: 0`.
pub async fn make_admin(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(email): Path<String>,
) -> ApiResult<Json<UpdateOutcome>> {
    let mut set = Document::new();
    set.insert(ROLE_FIELD.to_string(), Value::String(Role::Admin.as_str().to_string()));

    let outcome = state
        .db
        .update_one(Collection::Users, Filter::eq(EMAIL_FIELD, email.as_str()), set, false)
        .await?;

    info!(
        "{} granted admin to {}: matched={}",
        auth_user.email, email, outcome.matched_count
    );
    Ok(Json(outcome))
}
