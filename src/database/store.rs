use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::document::{Collection, DeleteOutcome, Document, Filter, InsertOutcome, UpdateOutcome};

/// Errors raised by the document store layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Operations every document store backend provides.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError>;

    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Sets the given fields on the first matching document. With `upsert`
    /// a missing document is created from the filter fields plus `set`.
    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError>;

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteOutcome, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
