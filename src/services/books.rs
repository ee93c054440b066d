//! Book service

use std::collections::HashMap;

use super::DeleteOutcome;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookData, BookInstance, Genre},
    repository::{Filter, Repository, Sort},
};

/// A book with its author resolved, as shown in the book list
#[derive(Debug, Clone)]
pub struct BookEntry {
    pub book: Book,
    pub author: Option<Author>,
}

/// Everything the book detail page shows
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books sorted by title, each with its author
    pub async fn list(&self) -> AppResult<Vec<BookEntry>> {
        let (books, authors) = tokio::try_join!(
            self.repository.books.find_all(Some(Sort::asc("title"))),
            self.repository.authors.find_all(None),
        )?;

        let authors: HashMap<String, Author> =
            authors.into_iter().map(|a| (a.id.clone(), a)).collect();
        Ok(books
            .into_iter()
            .map(|book| BookEntry {
                author: authors.get(&book.author).cloned(),
                book,
            })
            .collect())
    }

    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Fetch a book and its copies, concurrently
    pub async fn with_instances(&self, id: &str) -> AppResult<(Option<Book>, Vec<BookInstance>)> {
        tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.book_instances.find_by_filter(Filter::eq("book", id)),
        )
    }

    pub async fn detail(&self, id: &str) -> AppResult<BookDetail> {
        let (book, instances) = self.with_instances(id).await?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let (author, genres) = tokio::try_join!(
            self.repository.authors.find_by_id(&book.author),
            self.genres_of(&book),
        )?;

        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    async fn genres_of(&self, book: &Book) -> AppResult<Vec<Genre>> {
        let genres = self.repository.genres.find_all(Some(Sort::asc("name"))).await?;
        Ok(genres
            .into_iter()
            .filter(|genre| book.genre.contains(&genre.id))
            .collect())
    }

    /// Authors and genres offered by the book form
    pub async fn form_choices(&self) -> AppResult<(Vec<Author>, Vec<Genre>)> {
        tokio::try_join!(
            self.repository.authors.find_all(Some(Sort::asc("family_name"))),
            self.repository.genres.find_all(Some(Sort::asc("name"))),
        )
    }

    pub async fn create(&self, data: BookData) -> AppResult<Book> {
        let book = data.create();
        self.repository.books.save(&book).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(book)
    }

    /// Replace the book stored under `id`
    pub async fn update(&self, id: &str, data: BookData) -> AppResult<Book> {
        let book = data.into_book(id.to_string());
        self.repository.books.update_by_id(id, &book).await?;
        tracing::info!("Updated book {}", id);
        Ok(book)
    }

    /// Delete a book with no copies
    pub async fn delete(&self, id: &str) -> AppResult<DeleteOutcome<Book, BookInstance>> {
        let (book, instances) = self.with_instances(id).await?;
        let Some(book) = book else {
            return Ok(DeleteOutcome::Missing);
        };

        if !instances.is_empty() {
            tracing::warn!("Refusing to delete book {}: {} copies remain", id, instances.len());
            return Ok(DeleteOutcome::Blocked {
                record: book,
                dependents: instances,
            });
        }

        self.repository.books.delete_by_id(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(DeleteOutcome::Deleted)
    }
}
