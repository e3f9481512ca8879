use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::DomainError;
use crate::format;
use crate::models::{CreatePaymentRequest, Payment, PaymentStatus, UpdatePaymentRequest};
use crate::repository::EntityRepository;
use crate::services::ensure_valid;
use crate::stats::PaymentStatistics;
use crate::store::DocumentStore;
use crate::validation::payments::{validate_create, validate_update};

#[derive(Clone)]
pub struct PaymentService {
    repo: EntityRepository<Payment>,
}

impl PaymentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: EntityRepository::new(store),
        }
    }

    #[instrument(skip(self, request), fields(%owner))]
    pub async fn create(
        &self,
        owner: Uuid,
        request: CreatePaymentRequest,
    ) -> Result<Payment, DomainError> {
        ensure_valid(validate_create(&request))?;
        let payment = self.repo.create(owner, &request).await?;
        info!(payment_id = %payment.id, "payment created");
        Ok(payment)
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Payment>, DomainError> {
        self.repo.list_by_owner(owner).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Payment, DomainError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            warn!(payment_id = %id, "payment not found");
            DomainError::NotFound(format!("payment {id} not found"))
        })
    }

    #[instrument(skip(self, request), fields(payment_id = %id))]
    pub async fn update(&self, id: Uuid, request: UpdatePaymentRequest) -> Result<(), DomainError> {
        ensure_valid(validate_update(&request))?;
        self.repo.update(id, &request).await
    }

    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.repo.delete(id).await?;
        info!(payment_id = %id, "payment deleted");
        Ok(())
    }

    /// Settles the payment: status goes to paid and the paid date is
    /// stamped with today, at day precision.
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn mark_paid(&self, id: Uuid) -> Result<(), DomainError> {
        let patch = UpdatePaymentRequest {
            status: Some(PaymentStatus::Paid),
            paid_date: Some(format::format_date_utc(Utc::now())),
            ..Default::default()
        };
        self.repo.update(id, &patch).await?;
        info!(payment_id = %id, "payment marked paid");
        Ok(())
    }

    /// Reopens the payment. Only the status flips back; a previously
    /// stamped paid date stays on the record.
    #[instrument(skip(self), fields(payment_id = %id))]
    pub async fn mark_pending(&self, id: Uuid) -> Result<(), DomainError> {
        let patch = UpdatePaymentRequest {
            status: Some(PaymentStatus::Pending),
            ..Default::default()
        };
        self.repo.update(id, &patch).await?;
        info!(payment_id = %id, "payment marked pending");
        Ok(())
    }

    pub async fn statistics(&self, owner: Uuid) -> Result<PaymentStatistics, DomainError> {
        let payments = self.repo.list_by_owner(owner).await?;
        Ok(PaymentStatistics::compute(&payments))
    }
}
