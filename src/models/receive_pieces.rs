use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::models::{date_field_to_timestamp, trim_or_drop_field};
use crate::repository::StoredEntity;
use crate::store::{self, timestamp, Document, DocumentData, DocumentId, StoreError};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReceiveQuality {
    Excellent,
    #[default]
    Good,
    Regular,
    Poor,
}

impl ReceiveQuality {
    /// Hex color used when rendering the quality badge.
    pub fn color(&self) -> &'static str {
        match self {
            ReceiveQuality::Excellent => "#10B981",
            ReceiveQuality::Good => "#3B82F6",
            ReceiveQuality::Regular => "#F59E0B",
            ReceiveQuality::Poor => "#EF4444",
        }
    }
}

/// A delivery of finished pieces received back from a workshop.
///
/// `batch_name` and `workshop_name` are denormalized at record time for
/// display and do not track later renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivePieces {
    #[serde(skip)]
    pub id: DocumentId,
    pub batch_id: Uuid,
    pub batch_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    pub pieces_received: i64,
    #[serde(with = "timestamp::ts_millis")]
    pub receive_date: DateTime<Utc>,
    pub quality: ReceiveQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub user_id: Uuid,
    #[serde(with = "timestamp::ts_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::ts_millis")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReceivePiecesRequest {
    pub batch_id: Uuid,
    #[validate(length(min = 1, message = "receivePieces.batchRequired"))]
    pub batch_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[validate(range(min = 1, message = "receivePieces.piecesRequired"))]
    pub pieces_received: i64,
    #[validate(length(min = 1, message = "receivePieces.dateRequired"))]
    pub receive_date: String,
    #[serde(default)]
    pub quality: ReceiveQuality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReceivePiecesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "receivePieces.batchRequired"))]
    pub batch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces_received: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ReceiveQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl StoredEntity for ReceivePieces {
    const COLLECTION: &'static str = "receivePieces";
    type Create = CreateReceivePiecesRequest;
    type Update = UpdateReceivePiecesRequest;

    fn encode_create(data: &Self::Create) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_or_drop_field(&mut doc, "observations");
        doc.insert(
            "receiveDate".into(),
            date_field_to_timestamp(&data.receive_date, "receiveDate")?,
        );
        Ok(doc)
    }

    fn encode_update(data: &Self::Update) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_or_drop_field(&mut doc, "observations");
        if let Some(raw) = data.receive_date.as_deref() {
            doc.insert(
                "receiveDate".into(),
                date_field_to_timestamp(raw, "receiveDate")?,
            );
        }
        Ok(doc)
    }

    fn decode(doc: &Document) -> Result<Self, StoreError> {
        let mut receipt: Self = serde_json::from_value(doc.data.clone().into())?;
        receipt.id = doc.id;
        Ok(receipt)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.receive_date
    }
}
