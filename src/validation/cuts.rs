use crate::i18n::MessageKey;
use crate::models::{CreateCutRequest, UpdateCutRequest};
use crate::validation::{trimmed_len, FieldErrors};

/// Cut form rules: garment type at least 3 characters, piece count
/// strictly positive.
pub fn validate_create(data: &CreateCutRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if trimmed_len(&data.kind) < 3 {
        errors.insert("kind", MessageKey::CutTypeRequired);
    }
    if data.total_pieces <= 0 {
        errors.insert("total_pieces", MessageKey::CutPiecesRequired);
    }
    errors
}

pub fn validate_update(data: &UpdateCutRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(kind) = data.kind.as_deref() {
        if trimmed_len(kind) < 3 {
            errors.insert("kind", MessageKey::CutTypeRequired);
        }
    }
    if let Some(pieces) = data.total_pieces {
        if pieces <= 0 {
            errors.insert("total_pieces", MessageKey::CutPiecesRequired);
        }
    }
    errors
}
