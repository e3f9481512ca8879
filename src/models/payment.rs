use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::format;
use crate::models::{date_field_to_timestamp, trim_field};
use crate::repository::StoredEntity;
use crate::store::{self, timestamp, Document, DocumentData, DocumentId, StoreError};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl PaymentStatus {
    /// Hex color for the status badge.
    pub fn color(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "#F59E0B",
            PaymentStatus::Paid => "#10B981",
            PaymentStatus::Overdue => "#EF4444",
            PaymentStatus::Cancelled => "#6B7280",
        }
    }
}

/// A payment owed to a workshop for a batch of finished pieces.
///
/// `workshop_name` and `batch_name` are denormalized copies taken when
/// the payment is written and are not refreshed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(skip)]
    pub id: DocumentId,
    pub description: String,
    pub amount: Decimal,
    #[serde(with = "timestamp::ts_millis")]
    pub due_date: DateTime<Utc>,
    #[serde(
        default,
        with = "timestamp::ts_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_date: Option<DateTime<Utc>>,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
    pub user_id: Uuid,
    #[serde(with = "timestamp::ts_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::ts_millis")]
    pub updated_at: DateTime<Utc>,
}

/// `amount` arrives as Brazilian decimal-comma text ("1.234,56") and the
/// date fields as `dd/mm/yyyy`; both are converted during encoding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, message = "payments.descriptionRequired"))]
    pub description: String,
    #[validate(length(min = 1, message = "payments.amountRequired"))]
    pub amount: String,
    #[validate(length(min = 1, message = "payments.dueDateRequired"))]
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    /// Starting status, pending unless the form picked another.
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "payments.descriptionRequired"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
}

fn amount_to_decimal(raw: &str) -> Result<Decimal, DomainError> {
    format::parse_amount(raw)
        .ok_or_else(|| DomainError::InvalidInput(format!("invalid amount: {raw}")))
}

impl StoredEntity for Payment {
    const COLLECTION: &'static str = "payments";
    type Create = CreatePaymentRequest;
    type Update = UpdatePaymentRequest;

    fn encode_create(data: &Self::Create) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "description");
        doc.insert("amount".into(), json!(amount_to_decimal(&data.amount)?));
        doc.insert(
            "dueDate".into(),
            date_field_to_timestamp(&data.due_date, "dueDate")?,
        );
        if let Some(raw) = data.paid_date.as_deref() {
            doc.insert("paidDate".into(), date_field_to_timestamp(raw, "paidDate")?);
        }
        Ok(doc)
    }

    fn encode_update(data: &Self::Update) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "description");
        if let Some(raw) = data.amount.as_deref() {
            doc.insert("amount".into(), json!(amount_to_decimal(raw)?));
        }
        if let Some(raw) = data.due_date.as_deref() {
            doc.insert("dueDate".into(), date_field_to_timestamp(raw, "dueDate")?);
        }
        if let Some(raw) = data.paid_date.as_deref() {
            doc.insert("paidDate".into(), date_field_to_timestamp(raw, "paidDate")?);
        }
        Ok(doc)
    }

    fn decode(doc: &Document) -> Result<Self, StoreError> {
        let mut payment: Self = serde_json::from_value(doc.data.clone().into())?;
        payment.id = doc.id;
        Ok(payment)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.due_date
    }
}
