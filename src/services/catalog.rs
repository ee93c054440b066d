//! Catalog overview service

use serde::Serialize;

use crate::{
    error::AppResult,
    models::InstanceStatus,
    repository::{Filter, Repository},
};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub book_count: u64,
    pub book_instance_count: u64,
    pub book_instance_available_count: u64,
    pub author_count: u64,
    pub genre_count: u64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let available = Filter::eq("status", InstanceStatus::Available.as_str());
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) = tokio::try_join!(
            self.repository.books.count(Filter::all()),
            self.repository.book_instances.count(Filter::all()),
            self.repository.book_instances.count(available),
            self.repository.authors.count(Filter::all()),
            self.repository.genres.count(Filter::all()),
        )?;

        Ok(CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }

    /// Check the store answers, for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.store.ping().await
    }
}
