//! Repository layer over the document store

pub mod collection;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod store;

use std::sync::Arc;

pub use collection::{new_id, Collection, Document};
pub use query::{Filter, Query, Sort};
pub use store::DocumentStore;

use crate::{
    config::{DatabaseConfig, StoreBackend},
    error::AppResult,
    models::{Author, Book, BookInstance, Genre},
};

/// Main repository struct holding the store handle and one typed accessor
/// per entity
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn DocumentStore>,
    pub genres: Collection<Genre>,
    pub books: Collection<Book>,
    pub authors: Collection<Author>,
    pub book_instances: Collection<BookInstance>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            genres: Collection::new(store.clone()),
            books: Collection::new(store.clone()),
            authors: Collection::new(store.clone()),
            book_instances: Collection::new(store.clone()),
            store,
        }
    }
}

/// Open the store backend selected by configuration
pub async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on restart");
            Ok(Arc::new(memory::MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let store = postgres::PostgresStore::connect(config).await?;
            tracing::info!("Connected to database");
            Ok(Arc::new(store))
        }
    }
}
