//! Field rules for the untyped documents each collection holds.

pub mod booking;
pub mod product;
pub mod rating;
pub mod user;

use serde_json::Value;

use super::document::{Document, ID_FIELD};

/// Fields only the store may assign
const SYSTEM_FIELDS: &[&str] = &[ID_FIELD];

/// Errors raised while checking client-supplied documents
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("System field '{0}' cannot be set via API input")]
    SystemFieldNotAllowed(&'static str),
    #[error("Missing required fields: {0:?}")]
    MissingRequiredFields(Vec<&'static str>),
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Missing, null and empty-string values do not count as provided
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

pub fn missing_fields(document: &Document, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| is_blank(document.get(*field)))
        .collect()
}

pub fn require_fields(document: &Document, required: &[&'static str]) -> Result<(), ModelError> {
    let missing = missing_fields(document, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ModelError::MissingRequiredFields(missing))
    }
}

/// `name` field as shown in confirmation messages
pub fn display_name(document: &Document) -> String {
    match document.get("name") {
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

pub fn reject_system_fields(document: &Document) -> Result<(), ModelError> {
    match SYSTEM_FIELDS.iter().find(|field| document.contains_key(**field)) {
        Some(field) => Err(ModelError::SystemFieldNotAllowed(*field)),
        None => Ok(()),
    }
}
