use serde::Deserialize;

use super::{reject_system_fields, require_fields, ModelError};
use crate::database::document::Document;

pub const REQUIRED_FIELDS: &[&str] = &["name", "email", "product", "phone", "price", "address"];

pub fn validate_new(booking: &Document) -> Result<(), ModelError> {
    reject_system_fields(booking)?;
    require_fields(booking, REQUIRED_FIELDS)
}

/// Query string of `GET /myitem`
#[derive(Debug, Deserialize)]
pub struct MyItemsQuery {
    pub email: Option<String>,
}
