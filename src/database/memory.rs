use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use super::document::{
    Collection, DeleteOutcome, Document, Filter, InsertOutcome, UpdateOutcome, ID_FIELD,
};
use super::store::{DocumentStore, StoreError};

/// Process-local document store used by tests and `STORE_BACKEND=memory`
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let id = ObjectId::new().to_hex();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().push(document);
        Ok(InsertOutcome::new(id))
    }

    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|document| filter.matches(document)))
            .cloned())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if let Some(existing) = documents.iter_mut().find(|document| filter.matches(document)) {
            let mut modified = false;
            for (field, value) in set {
                if existing.get(&field) != Some(&value) {
                    existing.insert(field, value);
                    modified = true;
                }
            }
            return Ok(UpdateOutcome::new(1, u64::from(modified), None));
        }

        if !upsert {
            return Ok(UpdateOutcome::new(0, 0, None));
        }

        let mut created = filter.seed_fields();
        created.extend(set);
        let id = match created.get(ID_FIELD).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = ObjectId::new().to_hex();
                created.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };
        documents.push(created);
        Ok(UpdateOutcome::new(0, 0, Some(id)))
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(DeleteOutcome::new(0));
        };

        match documents.iter().position(|document| filter.matches(document)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteOutcome::new(1))
            }
            None => Ok(DeleteOutcome::new(0)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::document::parse_object_id;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn inserted_documents_get_object_ids() {
        let store = MemoryStore::new();
        let outcome = store
            .insert_one(Collection::Products, doc(json!({ "name": "Drill" })))
            .await
            .unwrap();

        let id = parse_object_id(&outcome.inserted_id).expect("valid object id");
        let found = store
            .find_one(Collection::Products, Filter::id(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get("name"), Some(&json!("Drill")));
        assert!(store.find(Collection::Bookings, Filter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_sets_only_given_fields() {
        let store = MemoryStore::new();
        store
            .insert_one(Collection::Users, doc(json!({ "email": "a@b.com", "name": "A" })))
            .await
            .unwrap();

        let outcome = store
            .update_one(
                Collection::Users,
                Filter::eq("email", "a@b.com"),
                doc(json!({ "role": "admin" })),
                false,
            )
            .await
            .unwrap();
        assert_eq!((outcome.matched_count, outcome.modified_count), (1, 1));

        let user = store
            .find_one(Collection::Users, Filter::eq("email", "a@b.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.get("name"), Some(&json!("A")));
        assert_eq!(user.get("role"), Some(&json!("admin")));
    }

    #[tokio::test]
    async fn upsert_creates_from_filter_and_set() {
        let store = MemoryStore::new();

        let skipped = store
            .update_one(
                Collection::Users,
                Filter::eq("email", "new@b.com"),
                doc(json!({ "name": "New" })),
                false,
            )
            .await
            .unwrap();
        assert_eq!(skipped.matched_count, 0);
        assert!(skipped.upserted_id.is_none());

        let created = store
            .update_one(
                Collection::Users,
                Filter::eq("email", "new@b.com"),
                doc(json!({ "name": "New" })),
                true,
            )
            .await
            .unwrap();
        assert_eq!(created.upserted_count, 1);

        let users = store.find(Collection::Users, Filter::All).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].get("email"), Some(&json!("new@b.com")));
        assert_eq!(users[0].get("_id"), Some(&json!(created.upserted_id.unwrap())));
    }

    #[tokio::test]
    async fn delete_reports_zero_when_nothing_matches() {
        let store = MemoryStore::new();
        let outcome = store
            .delete_one(Collection::Bookings, Filter::id(ObjectId::new()))
            .await
            .unwrap();
        assert_eq!(outcome.deleted_count, 0);
    }
}
