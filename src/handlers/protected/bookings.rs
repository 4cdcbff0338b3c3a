// handlers/protected/bookings.rs - GET /myitem handler

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use tracing::warn;

use crate::database::models::booking::MyItemsQuery;
use crate::database::models::user::EMAIL_FIELD;
use crate::database::{Collection, Document, Filter};
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /myitem?email= - Bookings of the authenticated caller.
///
/// The queried email must be the caller's own.
pub async fn my_items(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MyItemsQuery>,
) -> ApiResult<Json<Vec<Document>>> {
    if query.email.as_deref() != Some(auth_user.email.as_str()) {
        warn!(
            "{} asked for bookings of {:?}",
            auth_user.email, query.email
        );
        return Err(ApiError::forbidden("Forbidden Access"));
    }

    let bookings = state
        .db
        .find(Collection::Bookings, Filter::eq(EMAIL_FIELD, auth_user.email.as_str()))
        .await?;
    Ok(Json(bookings))
}
