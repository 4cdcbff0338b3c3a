// handlers/public/bookings.rs - /bookings handlers

use axum::{extract::State, Json};
use tracing::info;

use crate::database::models::{booking, display_name};
use crate::database::{Collection, Document, Filter};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{ActionResponse, ValidId};
use crate::state::AppState;

/// POST /bookings - Record a booking; the product reference is not checked
pub async fn create(
    State(state): State<AppState>,
    Json(booking): Json<Document>,
) -> ApiResult<ActionResponse> {
    booking::validate_new(&booking)?;
    let name = display_name(&booking);

    let outcome = state.db.insert_one(Collection::Bookings, booking).await?;
    info!("Inserted booking {} ({})", name, outcome.inserted_id);

    Ok(ActionResponse::success(format!("Successfully inserted {}", name)))
}

/// GET /bookings
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let bookings = state.db.find(Collection::Bookings, Filter::All).await?;
    Ok(Json(bookings))
}

/// DELETE /bookings/:id
pub async fn delete(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> ApiResult<ActionResponse> {
    let outcome = state.db.delete_one(Collection::Bookings, Filter::id(id)).await?;
    if outcome.deleted_count == 0 {
        return Err(ApiError::not_found("something went wrong"));
    }

    info!("Deleted booking {}", id);
    Ok(ActionResponse::success("Successfully deleted"))
}
