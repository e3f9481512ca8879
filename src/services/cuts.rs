use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::models::{CreateCutRequest, Cut, UpdateCutRequest};
use crate::repository::EntityRepository;
use crate::services::ensure_valid;
use crate::stats::CutStatistics;
use crate::store::DocumentStore;
use crate::validation::cuts::{validate_create, validate_update};

#[derive(Clone)]
pub struct CutService {
    repo: EntityRepository<Cut>,
}

impl CutService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: EntityRepository::new(store),
        }
    }

    #[instrument(skip(self, request), fields(%owner))]
    pub async fn create(&self, owner: Uuid, request: CreateCutRequest) -> Result<Cut, DomainError> {
        ensure_valid(validate_create(&request))?;
        let cut = self.repo.create(owner, &request).await?;
        info!(cut_id = %cut.id, "cut created");
        Ok(cut)
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Cut>, DomainError> {
        self.repo.list_by_owner(owner).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Cut, DomainError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            warn!(cut_id = %id, "cut not found");
            DomainError::NotFound(format!("cut {id} not found"))
        })
    }

    #[instrument(skip(self, request), fields(cut_id = %id))]
    pub async fn update(&self, id: Uuid, request: UpdateCutRequest) -> Result<(), DomainError> {
        ensure_valid(validate_update(&request))?;
        self.repo.update(id, &request).await
    }

    #[instrument(skip(self), fields(cut_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        info!(cut_id = %id, "cut deleted");
        Ok(())
    }

    pub async fn statistics(&self, owner: Uuid) -> Result<CutStatistics, DomainError> {
        let cuts = self.repo.list_by_owner(owner).await?;
        Ok(CutStatistics::compute(&cuts))
    }
}
