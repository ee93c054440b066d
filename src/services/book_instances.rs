//! Book instance (copy) service

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance},
    repository::{Repository, Sort},
};

/// A copy with its book resolved
#[derive(Debug, Clone)]
pub struct InstanceEntry {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies, each with its book
    pub async fn list(&self) -> AppResult<Vec<InstanceEntry>> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances.find_all(Some(Sort::asc("due_back"))),
            self.repository.books.find_all(None),
        )?;

        let books: HashMap<String, Book> = books.into_iter().map(|b| (b.id.clone(), b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| InstanceEntry {
                book: books.get(&instance.book).cloned(),
                instance,
            })
            .collect())
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<InstanceEntry>> {
        let Some(instance) = self.repository.book_instances.find_by_id(id).await? else {
            return Ok(None);
        };
        let book = self.repository.books.find_by_id(&instance.book).await?;
        Ok(Some(InstanceEntry { instance, book }))
    }

    pub async fn detail(&self, id: &str) -> AppResult<InstanceEntry> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    pub async fn get(&self, id: &str) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    /// Books offered by the copy form
    pub async fn book_choices(&self) -> AppResult<Vec<Book>> {
        self.repository.books.find_all(Some(Sort::asc("title"))).await
    }

    pub async fn create(&self, instance: BookInstance) -> AppResult<BookInstance> {
        self.repository.book_instances.save(&instance).await?;
        tracing::info!("Created book copy {} of book {}", instance.id, instance.book);
        Ok(instance)
    }

    /// Replace the copy stored under `id`
    pub async fn update(&self, id: &str, mut instance: BookInstance) -> AppResult<BookInstance> {
        instance.id = id.to_string();
        self.repository.book_instances.update_by_id(id, &instance).await?;
        tracing::info!("Updated book copy {}", id);
        Ok(instance)
    }

    /// Delete a copy; returns false when it did not exist
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        match self.repository.book_instances.delete_by_id(id).await {
            Ok(()) => {
                tracing::info!("Deleted book copy {}", id);
                Ok(true)
            }
            Err(AppError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
