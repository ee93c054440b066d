//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorForm, AuthorView};
pub use book::{Book, BookData, BookForm};
pub use book_instance::{BookInstance, BookInstanceForm, BookInstanceView, InstanceStatus};
pub use genre::{Genre, GenreForm};

/// Medium date format used across pages, e.g. "Jan 3, 1892"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
