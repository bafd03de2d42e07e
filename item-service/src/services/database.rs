use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Document},
    Collection,
};
use service_core::error::AppError;
use service_core::store::{MongoStore, UpdateOutcome};

use crate::models::{EmailCount, Item, ItemFields, ItemFilter};

/// Persistence operations behind the item handlers.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn health_check(&self) -> Result<(), AppError>;

    /// Insert and return the store-assigned id.
    async fn insert(&self, item: &Item) -> Result<ObjectId, AppError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Item>, AppError>;

    async fn update_fields(
        &self,
        id: &ObjectId,
        fields: &ItemFields,
    ) -> Result<UpdateOutcome, AppError>;

    /// Returns the number of deleted documents.
    async fn delete(&self, id: &ObjectId) -> Result<u64, AppError>;

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, AppError>;

    async fn count_by_email(&self) -> Result<Vec<EmailCount>, AppError>;
}

/// Group by email and rename the group key, yielding `{email, count}` rows.
pub fn count_by_email_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": "$email",
                "count": { "$sum": 1 },
            }
        },
        doc! {
            "$project": {
                "email": "$_id",
                "count": 1,
                "_id": 0,
            }
        },
    ]
}

#[derive(Clone)]
pub struct MongoItemRepository {
    store: MongoStore,
    collection: String,
}

impl MongoItemRepository {
    pub fn new(store: MongoStore, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn items(&self) -> Collection<Item> {
        self.store.collection(&self.collection)
    }
}

#[async_trait]
impl ItemRepository for MongoItemRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        self.store.health_check().await
    }

    async fn insert(&self, item: &Item) -> Result<ObjectId, AppError> {
        let result = self.items().insert_one(item, None).await.map_err(|e| {
            tracing::error!("Failed to insert item: {}", e);
            AppError::from(e)
        })?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Store returned a non-ObjectId id: {}",
                result.inserted_id
            ))
        })
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Item>, AppError> {
        self.items()
            .find_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(item_id = %id, "Failed to find item: {}", e);
                AppError::from(e)
            })
    }

    async fn update_fields(
        &self,
        id: &ObjectId,
        fields: &ItemFields,
    ) -> Result<UpdateOutcome, AppError> {
        let result = self
            .items()
            .update_one(doc! { "_id": *id }, fields.to_set_document(), None)
            .await
            .map_err(|e| {
                tracing::error!(item_id = %id, "Failed to update item: {}", e);
                AppError::from(e)
            })?;
        Ok(result.into())
    }

    async fn delete(&self, id: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .items()
            .delete_one(doc! { "_id": *id }, None)
            .await
            .map_err(|e| {
                tracing::error!(item_id = %id, "Failed to delete item: {}", e);
                AppError::from(e)
            })?;
        Ok(result.deleted_count)
    }

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, AppError> {
        let cursor = self
            .items()
            .find(filter.to_document(), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to filter items: {}", e);
                AppError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect filtered items: {}", e);
            AppError::from(e)
        })
    }

    async fn count_by_email(&self) -> Result<Vec<EmailCount>, AppError> {
        let cursor = self
            .items()
            .aggregate(count_by_email_pipeline(), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to aggregate item counts: {}", e);
                AppError::from(e)
            })?;

        let rows: Vec<Document> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect item counts: {}", e);
            AppError::from(e)
        })?;

        rows.into_iter()
            .map(|row| bson::from_document::<EmailCount>(row).map_err(AppError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_groups_then_renames_key() {
        let pipeline = count_by_email_pipeline();
        assert_eq!(pipeline.len(), 2);

        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$email");

        let project = pipeline[1].get_document("$project").unwrap();
        assert_eq!(project.get_str("email").unwrap(), "$_id");
        assert_eq!(project.get_i32("_id").unwrap(), 0);
    }

    #[test]
    fn aggregation_rows_decode_with_int32_counts() {
        let row = doc! { "count": 2_i32, "email": "a@example.com" };
        let decoded: EmailCount = bson::from_document(row).unwrap();
        assert_eq!(
            decoded,
            EmailCount {
                email: "a@example.com".to_string(),
                count: 2
            }
        );
    }
}
