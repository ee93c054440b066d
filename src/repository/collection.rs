//! Typed access to one collection of the document store

use std::{marker::PhantomData, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use super::{
    query::{Filter, Query, Sort},
    store::DocumentStore,
};
use crate::error::{AppError, AppResult};

/// An entity persisted as one document of a named collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection holding every document of this type
    const COLLECTION: &'static str;
    /// Human readable entity name, used in not-found messages
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

/// Generate a fresh document identifier
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    fn decode(doc: serde_json::Value) -> AppResult<T> {
        Ok(serde_json::from_value(doc)?)
    }

    fn not_found(id: &str) -> AppError {
        tracing::debug!("{} {} not found in {}", T::LABEL, id, T::COLLECTION);
        AppError::NotFound(format!("{} not found", T::LABEL))
    }

    /// Every document, optionally sorted
    pub async fn find_all(&self, sort: Option<Sort>) -> AppResult<Vec<T>> {
        let query = Query {
            filter: Filter::all(),
            sort,
        };
        self.find(&query).await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    /// Like [`find_by_id`](Self::find_by_id) but fails with `NotFound`
    pub async fn get_by_id(&self, id: &str) -> AppResult<T> {
        self.find_by_id(id).await?.ok_or_else(|| Self::not_found(id))
    }

    pub async fn find_by_filter(&self, filter: Filter) -> AppResult<Vec<T>> {
        self.find(&Query::new(filter)).await
    }

    pub async fn find(&self, query: &Query) -> AppResult<Vec<T>> {
        self.store
            .find(T::COLLECTION, query)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    /// First document matching `filter`, if any
    pub async fn find_one(&self, filter: Filter) -> AppResult<Option<T>> {
        Ok(self.find_by_filter(filter).await?.into_iter().next())
    }

    pub async fn count(&self, filter: Filter) -> AppResult<u64> {
        self.store.count(T::COLLECTION, &filter).await
    }

    /// Insert a new document
    pub async fn save(&self, entity: &T) -> AppResult<()> {
        let doc = serde_json::to_value(entity)?;
        self.store.insert(T::COLLECTION, entity.id(), doc).await
    }

    /// Replace the whole record stored under `id`
    pub async fn update_by_id(&self, id: &str, entity: &T) -> AppResult<()> {
        let doc = serde_json::to_value(entity)?;
        if self.store.replace(T::COLLECTION, id, doc).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }

    pub async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        if self.store.remove(T::COLLECTION, id).await? {
            Ok(())
        } else {
            Err(Self::not_found(id))
        }
    }
}
