//! Domain services, one per entity plus the shared container.
//!
//! Each service owns an [`EntityRepository`](crate::repository::EntityRepository)
//! handle and layers the screen-level validation rules and statistics on
//! top of it. Construct them through [`AppServices`] so every service
//! shares the same store and auth provider.

use std::sync::Arc;

use crate::auth::{AuthProvider, AuthService};
use crate::errors::DomainError;
use crate::store::DocumentStore;
use crate::validation::FieldErrors;

pub mod batches;
pub mod cuts;
pub mod payments;
pub mod receive_pieces;
pub mod workshops;

pub use batches::BatchService;
pub use cuts::CutService;
pub use payments::PaymentService;
pub use receive_pieces::ReceiveService;
pub use workshops::WorkshopService;

/// Container wiring every service to one shared document store and auth
/// provider.
#[derive(Clone)]
pub struct AppServices {
    pub workshops: Arc<WorkshopService>,
    pub cuts: Arc<CutService>,
    pub batches: Arc<BatchService>,
    pub payments: Arc<PaymentService>,
    pub receive_pieces: Arc<ReceiveService>,
    pub auth: Arc<AuthService>,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>, provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            workshops: Arc::new(WorkshopService::new(Arc::clone(&store))),
            cuts: Arc::new(CutService::new(Arc::clone(&store))),
            batches: Arc::new(BatchService::new(Arc::clone(&store))),
            payments: Arc::new(PaymentService::new(Arc::clone(&store))),
            receive_pieces: Arc::new(ReceiveService::new(Arc::clone(&store))),
            auth: Arc::new(AuthService::new(provider, store)),
        }
    }
}

/// Turns a screen-rule result into an error when any field failed.
pub(crate) fn ensure_valid(errors: FieldErrors) -> Result<(), DomainError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}
