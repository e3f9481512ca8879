use crate::i18n::MessageKey;
use crate::models::{CreateBatchRequest, UpdateBatchRequest};
use crate::validation::{trimmed_len, FieldErrors};

/// Batch form rules: name at least 3 characters, piece count strictly
/// positive. The delivery date is free text here and only verified when
/// the batch is encoded for the store.
pub fn validate_create(data: &CreateBatchRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if trimmed_len(&data.name) < 3 {
        errors.insert("name", MessageKey::BatchNameRequired);
    }
    if data.total_pieces <= 0 {
        errors.insert("total_pieces", MessageKey::BatchPiecesRequired);
    }
    errors
}

pub fn validate_update(data: &UpdateBatchRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(name) = data.name.as_deref() {
        if trimmed_len(name) < 3 {
            errors.insert("name", MessageKey::BatchNameRequired);
        }
    }
    if let Some(pieces) = data.total_pieces {
        if pieces <= 0 {
            errors.insert("total_pieces", MessageKey::BatchPiecesRequired);
        }
    }
    errors
}
