use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::models::{date_field_to_timestamp, trim_field, trim_or_drop_field};
use crate::repository::StoredEntity;
use crate::store::{self, timestamp, Document, DocumentData, DocumentId, StoreError};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl BatchStatus {
    /// Hex color for the status badge.
    pub fn color(&self) -> &'static str {
        match self {
            BatchStatus::Pending => "#6B7280",
            BatchStatus::InProgress => "#6366F1",
            BatchStatus::Completed => "#10B981",
            BatchStatus::Cancelled => "#EF4444",
        }
    }
}

/// A production batch assigned (or not yet assigned) to a workshop.
///
/// `workshop_name` is denormalized at assignment time and goes stale if
/// the workshop is later renamed; readers see the name as it was when
/// the batch was created or last updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    #[serde(skip)]
    pub id: DocumentId,
    pub name: String,
    pub total_pieces: i64,
    pub status: BatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[serde(
        default,
        with = "timestamp::ts_millis_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub user_id: Uuid,
    #[serde(with = "timestamp::ts_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::ts_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Dates arrive as `dd/mm/yyyy` form text and are converted to stored
/// timestamps during encoding.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    #[validate(length(min = 1, message = "batches.nameRequired"))]
    pub name: String,
    #[validate(range(min = 1, message = "batches.piecesRequired"))]
    pub total_pieces: i64,
    /// Starting status, pending unless the form picked another.
    #[serde(default)]
    pub status: BatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "batches.nameRequired"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pieces: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BatchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl StoredEntity for Batch {
    const COLLECTION: &'static str = "batches";
    type Create = CreateBatchRequest;
    type Update = UpdateBatchRequest;

    fn encode_create(data: &Self::Create) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "name");
        trim_or_drop_field(&mut doc, "observations");
        if let Some(raw) = data.delivery_date.as_deref() {
            doc.insert(
                "deliveryDate".into(),
                date_field_to_timestamp(raw, "deliveryDate")?,
            );
        }
        Ok(doc)
    }

    fn encode_update(data: &Self::Update) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "name");
        trim_or_drop_field(&mut doc, "observations");
        if let Some(raw) = data.delivery_date.as_deref() {
            doc.insert(
                "deliveryDate".into(),
                date_field_to_timestamp(raw, "deliveryDate")?,
            );
        }
        Ok(doc)
    }

    fn decode(doc: &Document) -> Result<Self, StoreError> {
        let mut batch: Self = serde_json::from_value(doc.data.clone().into())?;
        batch.id = doc.id;
        Ok(batch)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(name: &str) -> CreateBatchRequest {
        CreateBatchRequest {
            name: name.into(),
            total_pieces: 50,
            status: BatchStatus::default(),
            workshop_id: None,
            workshop_name: None,
            delivery_date: None,
            observations: None,
        }
    }

    #[test]
    fn new_batches_start_pending() {
        let doc = Batch::encode_create(&draft("Lote 01")).unwrap();
        assert_eq!(doc["status"], json!("pending"));
        assert!(!doc.contains_key("deliveryDate"));
    }

    #[test]
    fn form_text_is_trimmed_and_blank_observations_are_dropped() {
        let mut request = draft("  Lote 04  ");
        request.observations = Some("   ".into());
        let doc = Batch::encode_create(&request).unwrap();
        assert_eq!(doc["name"], json!("Lote 04"));
        assert!(!doc.contains_key("observations"));
    }

    #[test]
    fn delivery_date_is_stored_as_a_timestamp() {
        let mut request = draft("Lote 02");
        request.delivery_date = Some("15/03/2024".into());
        let doc = Batch::encode_create(&request).unwrap();
        assert!(doc["deliveryDate"].is_number());

        let decoded = Batch::decode(&Document {
            id: Uuid::new_v4(),
            data: {
                let mut data = doc;
                data.insert("userId".into(), json!(Uuid::new_v4()));
                data.insert("createdAt".into(), json!(1_700_000_000_000_i64));
                data.insert("updatedAt".into(), json!(1_700_000_000_000_i64));
                data
            },
        })
        .unwrap();
        let delivery = decoded.delivery_date.unwrap();
        assert_eq!(delivery.to_rfc3339(), "2024-03-15T00:00:00+00:00");
    }

    #[test]
    fn malformed_delivery_date_is_rejected_at_encode_time() {
        let mut request = draft("Lote 03");
        request.delivery_date = Some("15-03-2024".into());
        let err = Batch::encode_create(&request).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn status_update_keeps_other_fields_out_of_the_patch() {
        let request = UpdateBatchRequest {
            status: Some(BatchStatus::Completed),
            ..Default::default()
        };
        let doc = Batch::encode_update(&request).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["status"], json!("completed"));
    }

    #[test]
    fn status_text_forms() {
        assert_eq!(BatchStatus::InProgress.to_string(), "in_progress");
        assert_eq!(
            "completed".parse::<BatchStatus>().unwrap(),
            BatchStatus::Completed
        );
    }
}
