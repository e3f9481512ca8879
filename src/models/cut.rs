use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::models::{trim_field, trim_or_drop_field};
use crate::repository::StoredEntity;
use crate::store::{self, timestamp, Document, DocumentData, DocumentId, StoreError};

/// A fabric cut: a quantity of pieces of one garment type produced at
/// the cutting table, before being handed to a workshop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cut {
    #[serde(skip)]
    pub id: DocumentId,
    /// Garment type, free text ("Camiseta", "Calça"...).
    #[serde(rename = "type")]
    pub kind: String,
    pub total_pieces: i64,
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
pub struct CreateCutRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "cuts.typeRequired"))]
    pub kind: String,
    #[validate(range(min = 1, message = "cuts.piecesRequired"))]
    pub total_pieces: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCutRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "cuts.typeRequired"))]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pieces: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl StoredEntity for Cut {
    const COLLECTION: &'static str = "cuts";
    type Create = CreateCutRequest;
    type Update = UpdateCutRequest;

    fn encode_create(data: &Self::Create) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "type");
        trim_or_drop_field(&mut doc, "observations");
        Ok(doc)
    }

    fn encode_update(data: &Self::Update) -> Result<DocumentData, DomainError> {
        let mut doc = store::to_document(data)?;
        trim_field(&mut doc, "type");
        trim_or_drop_field(&mut doc, "observations");
        Ok(doc)
    }

    fn decode(doc: &Document) -> Result<Self, StoreError> {
        let mut cut: Self = serde_json::from_value(doc.data.clone().into())?;
        cut.id = doc.id;
        Ok(cut)
    }

    fn sort_key(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_serializes_under_the_stored_field_name() {
        let request = CreateCutRequest {
            kind: "Camiseta".into(),
            total_pieces: 40,
            observations: None,
        };
        let doc = Cut::encode_create(&request).unwrap();
        assert_eq!(doc["type"], json!("Camiseta"));
        assert_eq!(doc["totalPieces"], json!(40));
        assert!(!doc.contains_key("kind"));
    }

    #[test]
    fn blank_observations_never_reach_the_document() {
        let request = CreateCutRequest {
            kind: " Camiseta ".into(),
            total_pieces: 40,
            observations: Some("  ".into()),
        };
        let doc = Cut::encode_create(&request).unwrap();
        assert_eq!(doc["type"], json!("Camiseta"));
        assert!(!doc.contains_key("observations"));
    }

    #[test]
    fn decode_round_trips_observations() {
        let doc = Document {
            id: Uuid::new_v4(),
            data: serde_json::from_value(json!({
                "type": "Calça",
                "totalPieces": 25,
                "observations": "tecido jeans",
                "userId": Uuid::new_v4(),
                "createdAt": 1_700_000_000_000_i64,
                "updatedAt": 1_700_000_000_000_i64,
            }))
            .unwrap(),
        };
        let cut = Cut::decode(&doc).unwrap();
        assert_eq!(cut.kind, "Calça");
        assert_eq!(cut.observations.as_deref(), Some("tecido jeans"));
    }
}
