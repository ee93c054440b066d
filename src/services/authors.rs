//! Author service

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book},
    repository::{Filter, Query, Repository, Sort},
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All authors sorted by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.find_all(Some(Sort::asc("family_name"))).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Fetch an author and their books, concurrently
    pub async fn with_books(&self, id: &str) -> AppResult<(Option<Author>, Vec<Book>)> {
        let books_query = Query::new(Filter::eq("author", id)).sorted(Sort::asc("title"));
        tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.find(&books_query),
        )
    }

    pub async fn detail(&self, id: &str) -> AppResult<(Author, Vec<Book>)> {
        match self.with_books(id).await? {
            (Some(author), books) => Ok((author, books)),
            (None, _) => Err(AppError::NotFound("Author not found".to_string())),
        }
    }

    pub async fn create(&self, author: Author) -> AppResult<Author> {
        self.repository.authors.save(&author).await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(author)
    }

    /// Replace the author stored under `id`
    pub async fn update(&self, id: &str, mut author: Author) -> AppResult<Author> {
        author.id = id.to_string();
        self.repository.authors.update_by_id(id, &author).await?;
        tracing::info!("Updated author {}", id);
        Ok(author)
    }

    /// Delete an author with no books
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<Author, Book>> {
        let (author, books) = self.with_books(id).await?;
        let Some(author) = author else {
            return Ok(DeleteOutcome::Missing);
        };

        if !books.is_empty() {
            tracing::warn!("Refusing to delete author {}: {} book(s) still reference them", id, books.len());
            return Ok(DeleteOutcome::Blocked {
                record: author,
                dependents: books,
            });
        }

        self.repository.authors.delete_by_id(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
