//! In-memory [`DocumentStore`] used by tests and local runs.

use dashmap::DashMap;
use uuid::Uuid;

use super::{Document, DocumentData, DocumentId, DocumentStore, Filter, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, DashMap<DocumentId, DocumentData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|col| col.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn add(&self, collection: &str, data: DocumentData) -> Result<DocumentId, StoreError> {
        let id = Uuid::new_v4();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, data);
        Ok(id)
    }

    async fn put(
        &self,
        collection: &str,
        id: DocumentId,
        data: DocumentData,
    ) -> Result<(), StoreError> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id, data);
        Ok(())
    }

    async fn get(&self, collection: &str, id: DocumentId) -> Result<Option<Document>, StoreError> {
        let Some(col) = self.collections.get(collection) else {
            return Ok(None);
        };
        Ok(col.get(&id).map(|entry| Document {
            id,
            data: entry.value().clone(),
        }))
    }

    async fn query(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let Some(col) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(col
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| Document {
                id: *entry.key(),
                data: entry.value().clone(),
            })
            .collect())
    }

    async fn update(
        &self,
        collection: &str,
        id: DocumentId,
        patch: DocumentData,
    ) -> Result<(), StoreError> {
        let col = self
            .collections
            .get(collection)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id,
            })?;
        let mut entry = col.get_mut(&id).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id,
        })?;
        for (field, value) in patch {
            entry.insert(field, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: DocumentId) -> Result<(), StoreError> {
        if let Some(col) = self.collections.get(collection) {
            col.remove(&id);
        }
        Ok(())
    }
}
