//! Genre service

use super::{CreateOutcome, DeleteOutcome};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre},
    repository::{Filter, Query, Repository, Sort},
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All genres sorted by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.find_all(Some(Sort::asc("name"))).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    /// Fetch a genre and the books filed under it, concurrently
    pub async fn with_books(&self, id: &str) -> AppResult<(Option<Genre>, Vec<Book>)> {
        let books_query = Query::new(Filter::eq("genre", id)).sorted(Sort::asc("title"));
        tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.find(&books_query),
        )
    }

    pub async fn detail(&self, id: &str) -> AppResult<(Genre, Vec<Book>)> {
        match self.with_books(id).await? {
            (Some(genre), books) => Ok((genre, books)),
            (None, _) => Err(AppError::NotFound("Genre not found".to_string())),
        }
    }

    /// Create a genre unless one with exactly this name exists
    pub async fn create(&self, name: &str) -> AppResult<CreateOutcome<Genre>> {
        if let Some(existing) = self.repository.genres.find_one(Filter::eq("name", name)).await? {
            tracing::info!("Genre {:?} already exists as {}", name, existing.id);
            return Ok(CreateOutcome::Existing(existing));
        }

        let genre = Genre::new(name);
        self.repository.genres.save(&genre).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(CreateOutcome::Created(genre))
    }

    /// Replace the genre stored under `id`
    pub async fn update(&self, id: &str, name: &str) -> AppResult<Genre> {
        let genre = Genre {
            id: id.to_string(),
            name: name.to_string(),
        };
        self.repository.genres.update_by_id(id, &genre).await?;
        tracing::info!("Updated genre {}", id);
        Ok(genre)
    }

    /// Delete a genre no book refers to
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<Genre, Book>> {
        let (genre, books) = self.with_books(id).await?;
        let Some(genre) = genre else {
            return Ok(DeleteOutcome::Missing);
        };

        if !books.is_empty() {
            tracing::warn!("Refusing to delete genre {}: {} book(s) still use it", id, books.len());
            return Ok(DeleteOutcome::Blocked {
                record: genre,
                dependents: books,
            });
        }

        self.repository.genres.delete_by_id(id).await?;
        tracing::info!("Deleted genre {} ({})", id, genre.name);
        Ok(DeleteOutcome::Deleted)
    }
}
