use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::models::{Batch, BatchStatus, CreateBatchRequest, UpdateBatchRequest};
use crate::repository::EntityRepository;
use crate::services::ensure_valid;
use crate::stats::{BatchStatistics, FinishedProductionStatistics};
use crate::store::DocumentStore;
use crate::validation::batches::{validate_create, validate_update};

#[derive(Clone)]
pub struct BatchService {
    repo: EntityRepository<Batch>,
}

impl BatchService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: EntityRepository::new(store),
        }
    }

    #[instrument(skip(self, request), fields(%owner))]
    pub async fn create(
        &self,
        owner: Uuid,
        request: CreateBatchRequest,
    ) -> Result<Batch, DomainError> {
        ensure_valid(validate_create(&request))?;
        let batch = self.repo.create(owner, &request).await?;
        info!(batch_id = %batch.id, "batch created");
        Ok(batch)
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Batch>, DomainError> {
        self.repo.list_by_owner(owner).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Batch, DomainError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            warn!(batch_id = %id, "batch not found");
            DomainError::NotFound(format!("batch {id} not found"))
        })
    }

    #[instrument(skip(self, request), fields(batch_id = %id))]
    pub async fn update(&self, id: Uuid, request: UpdateBatchRequest) -> Result<(), DomainError> {
        ensure_valid(validate_update(&request))?;
        self.repo.update(id, &request).await
    }

    #[instrument(skip(self), fields(batch_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        info!(batch_id = %id, "batch deleted");
        Ok(())
    }

    /// Moves the batch to `status`. Any transition is accepted, including
    /// going backwards; the board relies on that for corrections.
    #[instrument(skip(self), fields(batch_id = %id, status = %status))]
    pub async fn update_status(&self, id: Uuid, status: BatchStatus) -> Result<(), DomainError> {
        let patch = UpdateBatchRequest {
            status: Some(status),
            ..Default::default()
        };
        self.repo.update(id, &patch).await
    }

    pub async fn statistics(&self, owner: Uuid) -> Result<BatchStatistics, DomainError> {
        let batches = self.repo.list_by_owner(owner).await?;
        Ok(BatchStatistics::compute(&batches))
    }

    /// Completed batches only, with a this-month slice keyed on when the
    /// batch was last touched.
    pub async fn finished_production(
        &self,
        owner: Uuid,
    ) -> Result<FinishedProductionStatistics, DomainError> {
        let batches = self.repo.list_by_owner(owner).await?;
        Ok(FinishedProductionStatistics::compute(&batches, Utc::now()))
    }
}
