use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, Bson, Document as BsonDocument},
    options::{ClientOptions, ServerApi, ServerApiVersion, UpdateOptions},
    Client,
};
use serde_json::Value;
use tracing::{debug, info};

use super::document::{Collection, DeleteOutcome, Document, Filter, InsertOutcome, UpdateOutcome};
use super::store::{DocumentStore, StoreError};

/// Document store backed by a MongoDB deployment
pub struct MongoStore {
    database: mongodb::Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database_name: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = Client::with_options(options)?;
        let database = client.database(database_name);

        info!("Created MongoDB client for database: {}", database_name);
        Ok(Self { database })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<BsonDocument> {
        self.database.collection(collection.name())
    }
}

fn to_bson_filter(filter: &Filter) -> Result<BsonDocument, StoreError> {
    match filter {
        Filter::All => Ok(BsonDocument::new()),
        Filter::Id(id) => Ok(doc! { "_id": *id }),
        Filter::Eq(field, value) => {
            let value = bson::to_bson(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
            let mut selector = BsonDocument::new();
            selector.insert(field.clone(), value);
            Ok(selector)
        }
    }
}

fn to_bson_document(document: &Document) -> Result<BsonDocument, StoreError> {
    bson::to_document(document).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// ObjectIds become plain hex strings; everything else uses relaxed extended JSON
fn from_bson_value(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}

fn from_bson_document(document: BsonDocument) -> Document {
    document
        .into_iter()
        .map(|(key, value)| (key, from_bson_value(value)))
        .collect()
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(id) => id.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend(&self) -> &'static str {
        "mongo"
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let document = to_bson_document(&document)?;
        let result = self.collection(collection).insert_one(document, None).await?;
        let inserted_id = id_to_string(result.inserted_id);
        debug!("Inserted {} into {}", inserted_id, collection);
        Ok(InsertOutcome::new(inserted_id))
    }

    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection(collection)
            .find(to_bson_filter(&filter)?, None)
            .await?;
        let documents: Vec<BsonDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(from_bson_document).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        let document = self
            .collection(collection)
            .find_one(to_bson_filter(&filter)?, None)
            .await?;
        Ok(document.map(from_bson_document))
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let update = doc! { "$set": to_bson_document(&set)? };
        let options = UpdateOptions::builder().upsert(upsert).build();
        let result = self
            .collection(collection)
            .update_one(to_bson_filter(&filter)?, update, options)
            .await?;
        Ok(UpdateOutcome::new(
            result.matched_count,
            result.modified_count,
            result.upserted_id.map(id_to_string),
        ))
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> Result<DeleteOutcome, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(to_bson_filter(&filter)?, None)
            .await?;
        Ok(DeleteOutcome::new(result.deleted_count))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
