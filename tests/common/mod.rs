#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use costura_core::auth::MemoryAuthProvider;
use costura_core::format;
use costura_core::models::{
    Batch, CreateBatchRequest, CreatePaymentRequest, CreateReceivePiecesRequest,
    CreateWorkshopRequest, RegisterCredentials,
};
use costura_core::services::AppServices;
use costura_core::store::memory::MemoryStore;

/// Helper harness wiring the full service container to in-memory store
/// and auth backends.
pub struct TestApp {
    pub services: AppServices,
    pub store: Arc<MemoryStore>,
    pub provider: Arc<MemoryAuthProvider>,
    /// Owner id the entity helpers create records under.
    pub owner: Uuid,
}

impl TestApp {
    /// Constructs a test application with fresh state.
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(MemoryAuthProvider::new());
        let services = AppServices::new(store.clone(), provider.clone());
        Self {
            services,
            store,
            provider,
            owner: Uuid::new_v4(),
        }
    }
}

pub fn workshop_draft(name: &str) -> CreateWorkshopRequest {
    CreateWorkshopRequest {
        name: name.into(),
        address: "Rua A, 100".into(),
        contact1: "11999990000".into(),
        contact2: None,
        status: Default::default(),
    }
}

pub fn batch_draft(name: &str, total_pieces: i64) -> CreateBatchRequest {
    CreateBatchRequest {
        name: name.into(),
        total_pieces,
        status: Default::default(),
        workshop_id: None,
        workshop_name: None,
        delivery_date: None,
        observations: None,
    }
}

pub fn payment_draft(description: &str, amount: &str) -> CreatePaymentRequest {
    CreatePaymentRequest {
        description: description.into(),
        amount: amount.into(),
        due_date: "10/04/2024".into(),
        paid_date: None,
        status: Default::default(),
        workshop_id: None,
        workshop_name: None,
        batch_id: None,
        batch_name: None,
    }
}

/// Receipt draft dated today, so month-slice statistics count it.
pub fn receive_draft(batch: &Batch, pieces_received: i64) -> CreateReceivePiecesRequest {
    CreateReceivePiecesRequest {
        batch_id: batch.id,
        batch_name: batch.name.clone(),
        workshop_id: None,
        workshop_name: None,
        pieces_received,
        receive_date: format::format_date_utc(Utc::now()),
        quality: Default::default(),
        observations: None,
    }
}

pub fn register_draft(email: &str) -> RegisterCredentials {
    RegisterCredentials {
        name: "Maria Silva".into(),
        company_name: "Confecções Silva".into(),
        email: email.into(),
        phone: "11987654321".into(),
        password: "segredo1".into(),
        confirm_password: "segredo1".into(),
    }
}
