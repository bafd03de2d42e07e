//! In-process repository used by tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use service_core::store::UpdateOutcome;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, MutexGuard,
};

use crate::models::{ClockFilter, ClockPatch, ClockRecord};
use crate::services::ClockRepository;

pub struct MockClockRepository {
    records: Mutex<Vec<ClockRecord>>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl Default for MockClockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClockRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A repository whose every call fails with a database error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }

    /// Number of repository calls made so far, health checks included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ClockRecord>>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.failure {
            return Err(AppError::DatabaseError(anyhow::anyhow!(message.clone())));
        }
        self.records.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Mock store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl ClockRepository for MockClockRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }

    async fn insert(&self, record: &ClockRecord) -> Result<ObjectId, AppError> {
        let id = ObjectId::new();
        let mut stored = record.clone();
        stored.id = Some(id);
        self.lock()?.push(stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<ClockRecord>, AppError> {
        Ok(self
            .lock()?
            .iter()
            .find(|r| r.id.as_ref() == Some(id))
            .cloned())
    }

    async fn update_fields(
        &self,
        id: &ObjectId,
        patch: &ClockPatch,
    ) -> Result<UpdateOutcome, AppError> {
        if patch.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!("No fields to update")));
        }

        let mut records = self.lock()?;
        let Some(record) = records.iter_mut().find(|r| r.id.as_ref() == Some(id)) else {
            return Ok(UpdateOutcome::default());
        };

        let before = record.clone();
        record.apply(patch);
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(*record != before),
        })
    }

    async fn delete(&self, id: &ObjectId) -> Result<u64, AppError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id.as_ref() != Some(id));
        Ok((before - records.len()) as u64)
    }

    async fn find(&self, filter: &ClockFilter) -> Result<Vec<ClockRecord>, AppError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}
