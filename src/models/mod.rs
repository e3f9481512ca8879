//! Entity records and their create/update request types.
//!
//! Records mirror the stored document shape: field names serialize in
//! camelCase, timestamps go through [`crate::store::timestamp`], and the
//! document id lives outside the field map. Create/update requests carry
//! `validator` derives whose messages are canonical message-key ids; the
//! repository runs them as a required-fields backstop behind the
//! screen-level validators.

use serde_json::Value;

use crate::errors::DomainError;
use crate::format;

pub mod batch;
pub mod cut;
pub mod payment;
pub mod receive_pieces;
pub mod user;
pub mod workshop;

pub use batch::{Batch, BatchStatus, CreateBatchRequest, UpdateBatchRequest};
pub use cut::{CreateCutRequest, Cut, UpdateCutRequest};
pub use payment::{CreatePaymentRequest, Payment, PaymentStatus, UpdatePaymentRequest};
pub use receive_pieces::{
    CreateReceivePiecesRequest, ReceivePieces, ReceiveQuality, UpdateReceivePiecesRequest,
};
pub use user::{LoginCredentials, ProfileForm, RegisterCredentials, UpdateProfileRequest, User};
pub use workshop::{CreateWorkshopRequest, UpdateWorkshopRequest, Workshop, WorkshopStatus};

/// Converts a `dd/mm/yyyy` form field into the stored timestamp encoding.
/// The day must exist in its month; the screen validators' range-only
/// check can let impossible combinations such as `31/02` through, and
/// those are refused here instead of being rolled over into March.
pub(crate) fn date_field_to_timestamp(raw: &str, field: &str) -> Result<Value, DomainError> {
    format::parse_date(raw)
        .and_then(|date| date.to_utc())
        .map(crate::store::timestamp::to_value)
        .ok_or_else(|| DomainError::InvalidInput(format!("invalid {field}: {raw}")))
}

/// Trims an encoded text field in place.
pub(crate) fn trim_field(doc: &mut crate::store::DocumentData, field: &str) {
    if let Some(Value::String(text)) = doc.get_mut(field) {
        *text = text.trim().to_owned();
    }
}

/// Trims an optional text field and removes it from the payload when
/// empty, so a blank form field never overwrites a stored value.
pub(crate) fn trim_or_drop_field(doc: &mut crate::store::DocumentData, field: &str) {
    let trimmed = match doc.get(field) {
        Some(Value::String(text)) => text.trim().to_owned(),
        _ => return,
    };
    if trimmed.is_empty() {
        doc.remove(field);
    } else {
        doc.insert(field.to_owned(), Value::String(trimmed));
    }
}
