//! Backend-neutral document store interface

use async_trait::async_trait;
use serde_json::Value;

use super::query::{Filter, Query};
use crate::error::AppResult;

/// Schema-less store of JSON documents grouped in named collections and
/// keyed by id.
///
/// Every call is independent; nothing is atomic across calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document under `id`
    async fn insert(&self, collection: &str, id: &str, doc: Value) -> AppResult<()>;

    async fn get(&self, collection: &str, id: &str) -> AppResult<Option<Value>>;

    async fn find(&self, collection: &str, query: &Query) -> AppResult<Vec<Value>>;

    async fn count(&self, collection: &str, filter: &Filter) -> AppResult<u64>;

    /// Replace the document stored under `id`; returns false when there is none
    async fn replace(&self, collection: &str, id: &str, doc: Value) -> AppResult<bool>;

    /// Remove the document stored under `id`; returns false when there is none
    async fn remove(&self, collection: &str, id: &str) -> AppResult<bool>;

    /// Round-trip to the backend, used by the readiness check
    async fn ping(&self) -> AppResult<()>;

    /// Release backend resources at shutdown
    async fn close(&self);
}
