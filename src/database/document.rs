use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use serde_json::{Map, Value};

/// Schema-less record as stored and returned over the wire
pub type Document = Map<String, Value>;

/// Field carrying the store-generated identifier
pub const ID_FIELD: &str = "_id";

/// Named collections exposed by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Bookings,
    Users,
    Ratings,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Bookings => "bookings",
            Collection::Users => "users",
            Collection::Ratings => "ratings",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Query selector understood by every store backend
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every document in the collection
    All,
    /// Document with the given store identifier
    Id(ObjectId),
    /// Documents whose top-level field equals the value
    Eq(String, Value),
}

impl Filter {
    pub fn id(id: ObjectId) -> Self {
        Filter::Id(id)
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq(field.into(), value.into())
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => document
                .get(ID_FIELD)
                .and_then(Value::as_str)
                .is_some_and(|stored| stored == id.to_hex()),
            Filter::Eq(field, value) => document.get(field) == Some(value),
        }
    }

    /// Fields a newly upserted document inherits from the selector
    pub fn seed_fields(&self) -> Document {
        let mut seed = Document::new();
        match self {
            Filter::All => {}
            Filter::Id(id) => {
                seed.insert(ID_FIELD.to_string(), Value::String(id.to_hex()));
            }
            Filter::Eq(field, value) => {
                seed.insert(field.clone(), value.clone());
            }
        }
        seed
    }
}

/// Returns true for a 24 character lowercase hex string
pub fn is_object_id(raw: &str) -> bool {
    raw.len() == 24 && raw.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

pub fn parse_object_id(raw: &str) -> Option<ObjectId> {
    if !is_object_id(raw) {
        return None;
    }
    ObjectId::parse_str(raw).ok()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertOutcome {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl UpdateOutcome {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<String>) -> Self {
        let upserted_count = u64::from(upserted_id.is_some());
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_id,
            upserted_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
