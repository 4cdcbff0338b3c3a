use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::database::document::parse_object_id;
use crate::error::ApiError;

/// Extractor for an `:id` path segment holding a store identifier.
///
/// Malformed identifiers are rejected with `Invalid id` before the handler
/// body runs, so no store call is attempted.
#[derive(Debug, Clone, Copy)]
pub struct ValidId(pub ObjectId);

#[async_trait]
impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::bad_request("Invalid id"))?;

        match parse_object_id(&raw) {
            Some(id) => Ok(ValidId(id)),
            None => {
                debug!("Rejected malformed id '{}' on {}", raw, parts.uri.path());
                Err(ApiError::bad_request("Invalid id"))
            }
        }
    }
}
