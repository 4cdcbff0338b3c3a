// handlers/public/ratings.rs - /ratings handlers

use axum::{extract::State, Json};

use crate::database::models::rating;
use crate::database::{Collection, Document, Filter, InsertOutcome};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /ratings - Store a free-form rating and return the insert result
pub async fn create(
    State(state): State<AppState>,
    Json(rating): Json<Document>,
) -> ApiResult<Json<InsertOutcome>> {
    rating::validate_new(&rating)?;
    let outcome = state.db.insert_one(Collection::Ratings, rating).await?;
    Ok(Json(outcome))
}

/// GET /ratings
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let ratings = state.db.find(Collection::Ratings, Filter::All).await?;
    Ok(Json(ratings))
}
