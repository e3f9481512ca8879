//! Narrow document-store contract the domain layer is written against.
//!
//! The production backend is an external managed document database; the
//! crate only assumes the operations below. [`MemoryStore`] implements the
//! same contract in process for tests and local runs.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod timestamp;

pub use memory::MemoryStore;

/// Identifier the store assigns to a document when it is added.
pub type DocumentId = Uuid;

/// Top-level fields of one stored document.
pub type DocumentData = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound {
        collection: String,
        id: DocumentId,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// One document with its store-assigned id. The id lives outside the
/// field map, matching how the backend keys documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub data: DocumentData,
}

/// Equality-only query filter. The app never needs anything richer: every
/// list screen filters on the owning user id.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn matches(&self, data: &DocumentData) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| data.get(field) == Some(value))
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Adds a document and returns its generated id.
    async fn add(&self, collection: &str, data: DocumentData) -> Result<DocumentId, StoreError>;

    /// Writes a document under a caller-chosen id, replacing any existing
    /// content. Used for records keyed by an external identity, such as
    /// user profiles keyed by the auth principal.
    async fn put(
        &self,
        collection: &str,
        id: DocumentId,
        data: DocumentData,
    ) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// Returns matching documents in unspecified order; callers sort.
    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// Merges the patch into an existing document's top-level fields.
    async fn update(
        &self,
        collection: &str,
        id: DocumentId,
        patch: DocumentData,
    ) -> Result<(), StoreError>;

    /// Removes a document. Deleting an id that is already gone is not an
    /// error.
    async fn delete(&self, collection: &str, id: DocumentId) -> Result<(), StoreError>;
}

/// Serializes a value into a document field map.
pub fn to_document<T: Serialize>(value: &T) -> Result<DocumentData, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected an object, got {other}"
        ))),
    }
}
