// handlers/protected/users.rs - GET /user handler

use axum::{extract::State, Json};

use crate::database::models::user::public_view;
use crate::database::{Collection, Document, Filter};
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /user - Every user record, without password hashes
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let users = state.db.find(Collection::Users, Filter::All).await?;
    Ok(Json(users.into_iter().map(public_view).collect()))
}
