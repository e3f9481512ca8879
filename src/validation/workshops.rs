use crate::i18n::MessageKey;
use crate::models::{CreateWorkshopRequest, UpdateWorkshopRequest};
use crate::validation::{trimmed_len, FieldErrors};

/// New-workshop form rules: name at least 3 characters, address at least
/// 5, primary contact at least 10 (mask characters count).
pub fn validate_create(data: &CreateWorkshopRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if trimmed_len(&data.name) < 3 {
        errors.insert("name", MessageKey::WorkshopNameRequired);
    }
    if trimmed_len(&data.address) < 5 {
        errors.insert("address", MessageKey::WorkshopAddressRequired);
    }
    if trimmed_len(&data.contact1) < 10 {
        errors.insert("contact1", MessageKey::WorkshopContact1Required);
    }
    errors
}

/// Same rules, applied only to the fields present in the patch.
pub fn validate_update(data: &UpdateWorkshopRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(name) = data.name.as_deref() {
        if trimmed_len(name) < 3 {
            errors.insert("name", MessageKey::WorkshopNameRequired);
        }
    }
    if let Some(address) = data.address.as_deref() {
        if trimmed_len(address) < 5 {
            errors.insert("address", MessageKey::WorkshopAddressRequired);
        }
    }
    if let Some(contact1) = data.contact1.as_deref() {
        if trimmed_len(contact1) < 10 {
            errors.insert("contact1", MessageKey::WorkshopContact1Required);
        }
    }
    errors
}
