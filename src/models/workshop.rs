use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::models::{trim_field, trim_or_drop_field};
use crate::repository::StoredEntity;
use crate::store::{self, timestamp, Document, DocumentData, DocumentId, StoreError};

/// Traffic-light style workshop health indicator. New workshops start
/// yellow; the status is free-form after that, any value can follow any
/// other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkshopStatus {
    Green,
    #[default]
    Yellow,
    Orange,
    Red,
}

impl WorkshopStatus {
    /// Hex color used by dashboards when rendering the status.
    pub fn color(&self) -> &'static str {
        match self {
            WorkshopStatus::Green => "#10B981",
            WorkshopStatus::Yellow => "#F59E0B",
            WorkshopStatus::Orange => "#F97316",
            WorkshopStatus::Red => "#EF4444",
        }
    }
}

/// A sewing workshop (facção) that receives cut pieces and returns
/// finished garments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    #[serde(skip)]
    pub id: DocumentId,
    pub name: String,
    pub address: String,
    /// Primary contact phone, stored as entered (masked digits).
    pub contact1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact2: Option<String>,
    pub status: WorkshopStatus,
    /// Running count of pieces currently with the workshop.
    pub total_pieces: i64,
    pub user_id: Uuid,
    #[serde(with = "timestamp::ts_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::ts_millis")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkshopRequest {
    #[validate(length(min = 1, message = "workshops.nameRequired"))]
    pub name: String,
    #[validate(length(min = 1, message = "workshops.addressRequired"))]
    pub address: String,
    #[validate(length(min = 1, message = "workshops.contact1Required"))]
    pub contact1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact2: Option<String>,
    /// Starting status, yellow unless the form picked another.
    #[serde(default)]
    pub status: WorkshopStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkshopRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "workshops.nameRequired"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "workshops.addressRequired"))]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "workshops.contact1Required"))]
    pub contact1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkshopStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pieces: Option<i64>,
}

impl StoredEntity for Workshop {
    const COLLECTION: &'static str = "workshops";
    type Create = CreateWorkshopRequest;
    type Update = UpdateWorkshopRequest;

    fn encode_create(data: &Self::Create) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "name");
        trim_field(&mut doc, "address");
        trim_field(&mut doc, "contact1");
        trim_or_drop_field(&mut doc, "contact2");
        // The piece counter always starts at zero, whatever the form says.
        doc.insert("totalPieces".into(), json!(0));
        Ok(doc)
    }

    fn encode_update(data: &Self::Update) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "name");
        trim_field(&mut doc, "address");
        trim_field(&mut doc, "contact1");
        trim_or_drop_field(&mut doc, "contact2");
        Ok(doc)
    }

    fn decode(doc: &Document) -> Result<Self, StoreError> {
        let mut workshop: Self = serde_json::from_value(doc.data.clone().into())?;
        workshop.id = doc.id;
        Ok(workshop)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }
}
