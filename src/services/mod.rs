//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use crate::repository::Repository;

/// Result of a create that refuses exact duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<T> {
    Created(T),
    /// An equivalent record already existed; nothing was written
    Existing(T),
}

impl<T> CreateOutcome<T> {
    pub fn record(&self) -> &T {
        match self {
            CreateOutcome::Created(record) | CreateOutcome::Existing(record) => record,
        }
    }
}

/// Result of a guarded delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome<T, D> {
    Deleted,
    /// No record with that id
    Missing,
    /// Other records still reference it; nothing was deleted
    Blocked { record: T, dependents: Vec<D> },
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub catalog: catalog::CatalogService,
    pub genres: genres::GenresService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            repository,
        }
    }
}
