//! Error taxonomy shared by every service in the crate.
//!
//! Four user-meaningful classes: field validation failures, missing
//! records, store/backend failures and auth failures. Each maps to a
//! [`MessageKey`] the UI can translate; field-level failures additionally
//! carry their own per-field keys.

use std::str::FromStr;

use crate::auth::AuthError;
use crate::i18n::MessageKey;
use crate::store::StoreError;
use crate::validation::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Field-level validation failures, keyed by document field name.
    /// Recoverable by the user correcting input; never a crash.
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// A single-value guard failed outside the per-field validators,
    /// e.g. a negative piece count on a quick update.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    /// Single source of truth mapping errors to user-facing message keys.
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) => MessageKey::CommonInvalidData,
            Self::NotFound(_) => MessageKey::CommonNotFound,
            Self::Store(_) | Self::Internal(_) => MessageKey::CommonStoreError,
            Self::Auth(err) => err.message_key(),
        }
    }

    /// Per-field message keys when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Derive-based request checks surface through the same field-key map the
/// validators produce. The derive messages are canonical key ids, so they
/// parse straight back into [`MessageKey`] values.
impl From<validator::ValidationErrors> for DomainError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in err.field_errors() {
            let key = errors
                .iter()
                .filter_map(|e| e.message.as_deref())
                .find_map(|message| MessageKey::from_str(message).ok())
                .unwrap_or(MessageKey::CommonInvalidData);
            fields.insert(field, key);
        }
        Self::Validation(fields)
    }
}
