//! Generic owner-scoped repository over the document store.
//!
//! Each entity type describes its own collection name, request types and
//! document encoding through [`StoredEntity`]; the repository contributes
//! the parts every entity shares: request validation, owner stamping,
//! `createdAt`/`updatedAt` maintenance and newest-first ordering.

use std::cmp::Reverse;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::errors::DomainError;
use crate::store::{
    timestamp, Document, DocumentData, DocumentId, DocumentStore, Filter, StoreError,
};

/// Document field holding the owning account id. Every listing filters
/// on it; there is no cross-owner query.
pub(crate) const OWNER_FIELD: &str = "userId";

/// Implemented by each stored entity to plug into [`EntityRepository`].
pub trait StoredEntity: Sized + Send + Sync {
    const COLLECTION: &'static str;

    /// Payload accepted by `create`. The derive-level rules are a
    /// required-fields backstop; the screen validators run first and
    /// carry the full rule set.
    type Create: Validate + Serialize + Send + Sync;
    /// Partial payload accepted by `update`; absent fields are left
    /// untouched in the stored document.
    type Update: Validate + Serialize + Send + Sync;

    fn encode_create(data: &Self::Create) -> Result<DocumentData, DomainError>;
    fn encode_update(data: &Self::Update) -> Result<DocumentData, DomainError>;
    fn decode(doc: &Document) -> Result<Self, StoreError>;

    /// Timestamp listings are ordered by, newest first.
    fn sort_key(&self) -> DateTime<Utc>;
}

pub struct EntityRepository<T: StoredEntity> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: StoredEntity> Clone for EntityRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<T: StoredEntity> EntityRepository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// Validates and stores a new document for `owner_id`, returning the
    /// decoded entity with its generated id.
    #[instrument(skip(self, data), fields(collection = T::COLLECTION, %owner_id))]
    pub async fn create(&self, owner_id: Uuid, data: &T::Create) -> Result<T, DomainError> {
        data.validate()?;
        let mut doc = T::encode_create(data)?;
        let now = Utc::now();
        doc.insert(OWNER_FIELD.into(), json!(owner_id));
        doc.insert("createdAt".into(), timestamp::to_value(now));
        doc.insert("updatedAt".into(), timestamp::to_value(now));
        let id = self.store.add(T::COLLECTION, doc.clone()).await?;
        Ok(T::decode(&Document { id, data: doc })?)
    }

    /// All of `owner_id`'s documents, newest first by the entity's sort
    /// key. The whole collection slice is loaded; there is no pagination.
    #[instrument(skip(self), fields(collection = T::COLLECTION, %owner_id))]
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<T>, DomainError> {
        let filter = Filter::new().field_eq(OWNER_FIELD, json!(owner_id));
        let docs = self.store.query(T::COLLECTION, &filter).await?;
        let mut entities = docs
            .iter()
            .map(T::decode)
            .collect::<Result<Vec<_>, StoreError>>()?;
        entities.sort_by_key(|entity| Reverse(entity.sort_key()));
        Ok(entities)
    }

    pub async fn get_by_id(&self, id: DocumentId) -> Result<Option<T>, DomainError> {
        match self.store.get(T::COLLECTION, id).await? {
            Some(doc) => Ok(Some(T::decode(&doc)?)),
            None => Ok(None),
        }
    }

    /// Merges the patch into the stored document; fields not present in
    /// `data` keep their stored values. Last write wins, there is no
    /// concurrency control.
    #[instrument(skip(self, data), fields(collection = T::COLLECTION, %id))]
    pub async fn update(&self, id: DocumentId, data: &T::Update) -> Result<(), DomainError> {
        data.validate()?;
        let mut patch = T::encode_update(data)?;
        patch.insert("updatedAt".into(), timestamp::to_value(Utc::now()));
        match self.store.update(T::COLLECTION, id, patch).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound { .. }) => {
                warn!(collection = T::COLLECTION, %id, "update on missing document");
                Err(DomainError::NotFound(format!(
                    "{} {} not found",
                    T::COLLECTION,
                    id
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Deleting an absent document is a no-op, matching the store.
    #[instrument(skip(self), fields(collection = T::COLLECTION, %id))]
    pub async fn delete(&self, id: DocumentId) -> Result<(), DomainError> {
        self.store.delete(T::COLLECTION, id).await?;
        Ok(())
    }
}
