use super::{reject_system_fields, ModelError};
use crate::database::document::Document;

/// Ratings are free-form; only store-owned fields are refused
pub fn validate_new(rating: &Document) -> Result<(), ModelError> {
    reject_system_fields(rating)
}
