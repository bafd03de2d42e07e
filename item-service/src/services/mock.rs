//! In-process repository used by tests and local runs without MongoDB.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use service_core::store::UpdateOutcome;
use std::sync::{Mutex, MutexGuard};

use crate::models::{EmailCount, Item, ItemFields, ItemFilter};
use crate::services::ItemRepository;

pub struct MockItemRepository {
    items: Mutex<Vec<Item>>,
    failure: Option<String>,
}

impl Default for MockItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockItemRepository {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// A repository whose every call fails with a database error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Item>>, AppError> {
        if let Some(message) = &self.failure {
            return Err(AppError::DatabaseError(anyhow::anyhow!(message.clone())));
        }
        self.items
            .lock()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Mock store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }

    async fn insert(&self, item: &Item) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        let mut stored = item.clone();
        stored.id = Some(id);
        self.lock()?.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Item>, AppError> {
        Ok(self
            .lock()?
            .iter()
            .find(|item| item.id.as_ref() == Some(id))
            .cloned())
    }

    async fn update_fields(
        &self,
        id: &ObjectId,
        fields: &ItemFields,
    ) -> Result<UpdateOutcome, AppError> {
        let mut items = self.lock()?;
        let Some(item) = items.iter_mut().find(|item| item.id.as_ref() == Some(id)) else {
            return Ok(UpdateOutcome::default());
        };

        let before = item.clone();
        item.apply(fields);
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(*item != before),
        })
    }

    async fn delete(&self, id: &ObjectId) -> Result<u64, AppError> {
        let mut items = self.lock()?;
        let before = items.len();
        items.retain(|item| item.id.as_ref() != Some(id));
        Ok((before - items.len()) as u64)
    }

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, AppError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    async fn count_by_email(&self) -> Result<Vec<EmailCount>, AppError> {
        let mut counts: Vec<EmailCount> = Vec::new();
        for item in self.lock()?.iter() {
            match counts.iter_mut().find(|c| c.email == item.email) {
                Some(row) => row.count += 1,
                None => counts.push(EmailCount {
                    email: item.email.clone(),
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }
}
