use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};
use service_core::error::AppError;
use service_core::store::{MongoStore, UpdateOutcome};

use crate::models::{ClockFilter, ClockPatch, ClockRecord};

#[async_trait]
pub trait ClockRepository: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    async fn insert(&self, record: &ClockRecord) -> Result<ObjectId, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<ClockRecord>, AppError>;

    /// Callers must not pass an empty patch.
    async fn update_fields(
        &self,
        id: &ObjectId,
        patch: &ClockPatch,
    ) -> Result<UpdateOutcome, AppError>;

    async fn delete(&self, id: &ObjectId) -> Result<u64, AppError>;

    async fn find(&self, filter: &ClockFilter) -> Result<Vec<ClockRecord>, AppError>;
}

#[derive(Clone)]
pub struct MongoClockRepository {
    store: MongoStore,
    collection: String,
}

impl MongoClockRepository {
    pub fn new(store: MongoStore, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn records(&self) -> Collection<ClockRecord> {
        self.store.collection(&self.collection)
    }
}

#[async_trait]
impl ClockRepository for MongoClockRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        self.store.health_check().await
    }

    async fn insert(&self, record: &ClockRecord) -> Result<ObjectId, AppError> {
        let result = self.records().insert_one(record, None).await.map_err(|e| {
            tracing::error!("Failed to insert clock record: {}", e);
            AppError::from(e)
        })?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Store returned a non-ObjectId id: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<ClockRecord>, AppError> {
        self.records()
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(record_id = %id, "Failed to find clock record: {}", e);
                AppError::from(e)
            })
    }

    async fn update_fields(
        &self,
        id: &ObjectId,
        patch: &ClockPatch,
    ) -> Result<UpdateOutcome, AppError> {
        let update = patch.to_set_document().ok_or_else(|| {
            AppError::BadRequest(anyhow::anyhow!("No fields to update"))
        })?;

        let result = self
            .records()
            .update_one(doc! { "_id": *id }, update, None)
            .await
            .map_err(|e| {
                tracing::error!(record_id = %id, "Failed to update clock record: {}", e);
                AppError::from(e)
            })?;
        Ok(result.into())
    }

    async fn delete(&self, id: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .records()
            .delete_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(record_id = %id, "Failed to delete clock record: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count)
    }

    async fn find(&self, filter: &ClockFilter) -> Result<Vec<ClockRecord>, AppError> {
        let cursor = self
            .records()
            .find(filter.to_document(), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to filter clock records: {}", e);
                AppError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect clock records: {}", e);
            AppError::from(e)
        })
    }
}
