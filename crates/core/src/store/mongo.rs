// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! MongoDB-backed record store.
//!
//! Records are plain documents in one collection, addressed by their `id`
//! field. The driver's `_id` is left to the server and ignored on read. There
//! is no schema step; the collection appears on first insert.

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{Client, Collection};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::RecordStore;
use crate::assignment::{Field, ListFilter};
use crate::clock::format_timestamp;
use crate::error::Result;
use crate::mapper::{Naming, RawRecord, Scalar, StorageFields};

const NAMING: Naming = Naming::Document;

/// Record store over a single MongoDB client.
pub struct MongoStore {
    uri: String,
    database: String,
    collection: String,
    client: Mutex<Option<Client>>,
}

impl MongoStore {
    pub fn new(uri: &str, database: &str, collection: &str) -> Self {
        MongoStore {
            uri: uri.to_string(),
            database: database.to_string(),
            collection: collection.to_string(),
            client: Mutex::new(None),
        }
    }

    /// Returns the records collection, connecting first if needed.
    ///
    /// A new client is only kept once the server answers a ping, so an
    /// unreachable server fails here rather than on the first query.
    async fn collection(&self) -> Result<Collection<Document>> {
        let mut guard = self.client.lock().await;
        let client = match guard.as_ref() {
            Some(client) => client.clone(),
            None => {
                debug!("setting up mongo client");
                let client = Client::with_uri_str(&self.uri).await?;
                client
                    .database(&self.database)
                    .run_command(doc! { "ping": 1 }, None)
                    .await?;
                info!(
                    database = %self.database,
                    collection = %self.collection,
                    "connected to mongodb"
                );
                *guard = Some(client.clone());
                client
            }
        };
        Ok(client
            .database(&self.database)
            .collection::<Document>(&self.collection))
    }
}

/// Builds the query document for a list filter.
pub(crate) fn filter_document(filter: &ListFilter) -> Document {
    filter
        .conditions()
        .into_iter()
        .map(|(field, value)| {
            (
                NAMING.storage_name(field).to_string(),
                Bson::String(value.to_string()),
            )
        })
        .collect()
}

fn id_filter(id: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(NAMING.storage_name(Field::Id), id);
    filter
}

/// Newest `createdAt` first.
fn newest_first() -> Document {
    let mut sort = Document::new();
    sort.insert(NAMING.storage_name(Field::CreatedAt), -1);
    sort
}

fn to_document(fields: StorageFields) -> Document {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), Bson::String(value)))
        .collect()
}

fn from_document(document: Document) -> RawRecord {
    document
        .into_iter()
        .map(|(name, value)| (name, Scalar::from(value)))
        .collect()
}

impl From<Bson> for Scalar {
    fn from(value: Bson) -> Self {
        match value {
            Bson::Null | Bson::Undefined => Scalar::Null,
            Bson::String(s) => Scalar::Text(s),
            Bson::Int32(i) => Scalar::Integer(i64::from(i)),
            Bson::Int64(i) => Scalar::Integer(i),
            Bson::Double(f) => Scalar::Real(f),
            Bson::Boolean(b) => Scalar::Bool(b),
            Bson::Binary(binary) => Scalar::Bytes(binary.bytes),
            Bson::DateTime(dt) => Scalar::Text(format_timestamp(dt.to_chrono())),
            Bson::ObjectId(oid) => Scalar::Text(oid.to_hex()),
            other => Scalar::Text(other.to_string()),
        }
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    fn naming(&self) -> Naming {
        NAMING
    }

    async fn open(&self) -> Result<()> {
        self.collection().await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let client = self.client.lock().await.take();
        if let Some(client) = client {
            client.shutdown().await;
            debug!("closed mongo client");
        }
        Ok(())
    }

    async fn find(&self, filter: &ListFilter) -> Result<Vec<RawRecord>> {
        let options = FindOptions::builder()
            .sort(newest_first())
            .build();
        let cursor = self
            .collection()
            .await?
            .find(filter_document(filter), options)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(from_document).collect())
    }

    async fn find_one(&self, id: &str) -> Result<Option<RawRecord>> {
        let document = self
            .collection()
            .await?
            .find_one(id_filter(id), None)
            .await?;
        Ok(document.map(from_document))
    }

    async fn insert(&self, fields: StorageFields) -> Result<()> {
        self.collection()
            .await?
            .insert_one(to_document(fields), None)
            .await?;
        Ok(())
    }

    async fn update_partial(&self, id: &str, fields: StorageFields) -> Result<u64> {
        let result = self
            .collection()
            .await?
            .update_one(id_filter(id), doc! { "$set": to_document(fields) }, None)
            .await?;
        Ok(result.matched_count)
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let result = self
            .collection()
            .await?
            .delete_one(id_filter(id), None)
            .await?;
        Ok(result.deleted_count)
    }
}

#[cfg(test)]
#[path = "mongo_tests.rs"]
mod tests;
