use rust_decimal::Decimal;

use crate::format;
use crate::i18n::MessageKey;
use crate::models::{CreatePaymentRequest, UpdatePaymentRequest};
use crate::validation::{digit_count, trimmed_len, FieldErrors};

/// Payment form rules. A missing and an unparseable amount share one
/// key, while the due date distinguishes "not filled in" (fewer than 8
/// digits) from "filled in but malformed". The paid date is optional and
/// only checked once it contains at least one digit.
pub fn validate_create(data: &CreatePaymentRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if trimmed_len(&data.description) < 3 {
        errors.insert("description", MessageKey::PaymentDescriptionRequired);
    }
    if !amount_is_positive(&data.amount) {
        errors.insert("amount", MessageKey::PaymentAmountRequired);
    }
    if let Some(key) = due_date_error(&data.due_date) {
        errors.insert("due_date", key);
    }
    if let Some(paid) = data.paid_date.as_deref() {
        if let Some(key) = paid_date_error(paid) {
            errors.insert("paid_date", key);
        }
    }
    errors
}

pub fn validate_update(data: &UpdatePaymentRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(description) = data.description.as_deref() {
        if trimmed_len(description) < 3 {
            errors.insert("description", MessageKey::PaymentDescriptionRequired);
        }
    }
    if let Some(amount) = data.amount.as_deref() {
        if !amount_is_positive(amount) {
            errors.insert("amount", MessageKey::PaymentAmountRequired);
        }
    }
    if let Some(due) = data.due_date.as_deref() {
        if let Some(key) = due_date_error(due) {
            errors.insert("due_date", key);
        }
    }
    if let Some(paid) = data.paid_date.as_deref() {
        if let Some(key) = paid_date_error(paid) {
            errors.insert("paid_date", key);
        }
    }
    errors
}

fn amount_is_positive(raw: &str) -> bool {
    format::parse_amount(raw).is_some_and(|amount| amount > Decimal::ZERO)
}

fn due_date_error(raw: &str) -> Option<MessageKey> {
    if digit_count(raw) < 8 {
        Some(MessageKey::PaymentDueDateRequired)
    } else if format::parse_date(raw).is_none() {
        Some(MessageKey::PaymentDueDateInvalid)
    } else {
        None
    }
}

fn paid_date_error(raw: &str) -> Option<MessageKey> {
    let digits = digit_count(raw);
    if digits == 0 {
        return None;
    }
    (digits < 8 || format::parse_date(raw).is_none()).then_some(MessageKey::PaymentPaidDateInvalid)
}
