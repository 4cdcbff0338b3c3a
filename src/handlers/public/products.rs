// handlers/public/products.rs - /products and /product/:id handlers

use axum::{extract::State, Json};
use tracing::info;

use crate::database::models::display_name;
use crate::database::models::product::{self, StockUpdate};
use crate::database::{Collection, Document, Filter, UpdateOutcome};
use crate::error::{ApiError, ApiResult};
use crate::middleware::{ActionResponse, ValidId};
use crate::state::AppState;

/// POST /products - List a new product
pub async fn create(
    State(state): State<AppState>,
    Json(product): Json<Document>,
) -> ApiResult<ActionResponse> {
    product::validate_new(&product)?;
    let name = display_name(&product);

    let outcome = state.db.insert_one(Collection::Products, product).await?;
    info!("Inserted product {} ({})", name, outcome.inserted_id);

    Ok(ActionResponse::success(format!("Successfully inserted {}", name)))
}

/// GET /products - Every product, unfiltered
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Document>>> {
    let products = state.db.find(Collection::Products, Filter::All).await?;
    Ok(Json(products))
}

/// GET /product/:id - One product, or `null` when absent
pub async fn get(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> ApiResult<Json<Option<Document>>> {
    let product = state.db.find_one(Collection::Products, Filter::id(id)).await?;
    Ok(Json(product))
}

/// PUT /product/:id - Set quantity and/or price, creating the product if absent
pub async fn update_stock(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    Json(update): Json<StockUpdate>,
) -> ApiResult<Json<UpdateOutcome>> {
    let set = update.into_set()?;
    let outcome = state
        .db
        .update_one(Collection::Products, Filter::id(id), set, true)
        .await?;

    info!(
        "Updated product {}: matched={} modified={}",
        id, outcome.matched_count, outcome.modified_count
    );
    Ok(Json(outcome))
}

/// DELETE /products/:id
pub async fn delete(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> ApiResult<ActionResponse> {
    let outcome = state.db.delete_one(Collection::Products, Filter::id(id)).await?;
    if outcome.deleted_count == 0 {
        return Err(ApiError::not_found("something went wrong"));
    }

    info!("Deleted product {}", id);
    Ok(ActionResponse::success("Successfully deleted"))
}
