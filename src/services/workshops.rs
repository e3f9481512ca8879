use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::models::{CreateWorkshopRequest, UpdateWorkshopRequest, Workshop, WorkshopStatus};
use crate::repository::EntityRepository;
use crate::services::ensure_valid;
use crate::stats::WorkshopStatistics;
use crate::store::DocumentStore;
use crate::validation::workshops::{validate_create, validate_update};

#[derive(Clone)]
pub struct WorkshopService {
    repo: EntityRepository<Workshop>,
}

impl WorkshopService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: EntityRepository::new(store),
        }
    }

    #[instrument(skip(self, request), fields(%owner))]
    pub async fn create(
        &self,
        owner: Uuid,
        request: CreateWorkshopRequest,
    ) -> Result<Workshop, DomainError> {
        ensure_valid(validate_create(&request))?;
        let workshop = self.repo.create(owner, &request).await?;
        info!(workshop_id = %workshop.id, "workshop created");
        Ok(workshop)
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Workshop>, DomainError> {
        self.repo.list_by_owner(owner).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Workshop, DomainError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            warn!(workshop_id = %id, "workshop not found");
            DomainError::NotFound(format!("workshop {id} not found"))
        })
    }

    #[instrument(skip(self, request), fields(workshop_id = %id))]
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateWorkshopRequest,
    ) -> Result<(), DomainError> {
        ensure_valid(validate_update(&request))?;
        self.repo.update(id, &request).await
    }

    #[instrument(skip(self), fields(workshop_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        info!(workshop_id = %id, "workshop deleted");
        Ok(())
    }

    /// Status-board shortcut: patches only the status field.
    #[instrument(skip(self), fields(workshop_id = %id, status = %status))]
    pub async fn update_status(
        &self,
        id: Uuid,
        status: WorkshopStatus,
    ) -> Result<(), DomainError> {
        let patch = UpdateWorkshopRequest {
            status: Some(status),
            ..Default::default()
        };
        self.repo.update(id, &patch).await
    }

    /// Overwrites the running piece counter kept on the workshop record.
    #[instrument(skip(self), fields(workshop_id = %id, total_pieces))]
    pub async fn update_pieces(&self, id: Uuid, total_pieces: i64) -> Result<(), DomainError> {
        if total_pieces < 0 {
            return Err(DomainError::InvalidInput(format!(
                "piece count cannot be negative: {total_pieces}"
            )));
        }
        let patch = UpdateWorkshopRequest {
            total_pieces: Some(total_pieces),
            ..Default::default()
        };
        self.repo.update(id, &patch).await
    }

    pub async fn statistics(&self, owner: Uuid) -> Result<WorkshopStatistics, DomainError> {
        let workshops = self.repo.list_by_owner(owner).await?;
        Ok(WorkshopStatistics::compute(&workshops))
    }
}
