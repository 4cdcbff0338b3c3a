pub mod document;
pub mod manager;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod store;

pub use document::{Collection, DeleteOutcome, Document, Filter, InsertOutcome, UpdateOutcome};
pub use manager::Database;
pub use store::{DocumentStore, StoreError};
