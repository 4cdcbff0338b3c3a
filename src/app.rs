use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};
use crate::state::AppState;

/// Build the full router over the given state
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .merge(elevated_routes(state.clone()))
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http());

    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{bookings, login, products, ratings, users};

    Router::new()
        // Token acquisition
        .route("/login", post(login::login))
        // Catalogue
        .route("/products", get(products::list).post(products::create))
        .route("/product/:id", get(products::get).put(products::update_stock))
        .route("/products/:id", delete(products::delete))
        // Bookings
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route("/bookings/:id", delete(bookings::delete))
        // Profiles
        .route("/user/:email", put(users::upsert_profile))
        .route("/admin/:email", get(users::admin_status))
        // Ratings
        .route("/ratings", get(ratings::list).post(ratings::create))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user", get(protected::users::list))
        .route("/myitem", get(protected::bookings::my_items))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    // Layers run outermost first: the token check precedes the role check
    Router::new()
        .route("/user/admin/:email", put(elevated::users::make_admin))
        .route_layer(from_fn_with_state(state.clone(), require_admin_middleware))
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

async fn root() -> &'static str {
    "Running server"
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok",
                    "backend": state.db.backend()
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
