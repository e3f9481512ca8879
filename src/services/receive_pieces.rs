use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::models::{CreateReceivePiecesRequest, ReceivePieces, UpdateReceivePiecesRequest};
use crate::repository::EntityRepository;
use crate::services::ensure_valid;
use crate::stats::ReceiptStatistics;
use crate::store::DocumentStore;
use crate::validation::receive_pieces::{validate_create, validate_update};

#[derive(Clone)]
pub struct ReceiveService {
    repo: EntityRepository<ReceivePieces>,
}

impl ReceiveService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: EntityRepository::new(store),
        }
    }

    #[instrument(skip(self, request), fields(%owner))]
    pub async fn create(
        &self,
        owner: Uuid,
        request: CreateReceivePiecesRequest,
    ) -> Result<ReceivePieces, DomainError> {
        ensure_valid(validate_create(&request))?;
        let receipt = self.repo.create(owner, &request).await?;
        info!(receipt_id = %receipt.id, "piece receipt recorded");
        Ok(receipt)
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<ReceivePieces>, DomainError> {
        self.repo.list_by_owner(owner).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ReceivePieces, DomainError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            warn!(receipt_id = %id, "piece receipt not found");
            DomainError::NotFound(format!("piece receipt {id} not found"))
        })
    }

    #[instrument(skip(self, request), fields(receipt_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateReceivePiecesRequest,
    ) -> Result<(), DomainError> {
        ensure_valid(validate_update(&request))?;
        self.repo.update(id, &request).await
    }

    #[instrument(skip(self), fields(receipt_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        info!(receipt_id = %id, "piece receipt deleted");
        Ok(())
    }

    pub async fn statistics(&self, owner: Uuid) -> Result<ReceiptStatistics, DomainError> {
        let receipts = self.repo.list_by_owner(owner).await?;
        Ok(ReceiptStatistics::compute(&receipts, Utc::now()))
    }
}
