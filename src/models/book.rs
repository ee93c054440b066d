//! Book model

use serde::{Deserialize, Serialize};

use crate::repository::{new_id, Document};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Author id
    pub author: String,
    pub summary: String,
    pub isbn: String,
    /// Genre ids
    #[serde(default)]
    pub genre: Vec<String>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

impl Document for Book {
    const COLLECTION: &'static str = "books";
    const LABEL: &'static str = "Book";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Book fields once validated, before an id is attached
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookData {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookData {
    pub fn into_book(self, id: String) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            summary: self.summary,
            isbn: self.isbn,
            genre: self.genre,
        }
    }

    pub fn create(self) -> Book {
        self.into_book(new_id())
    }
}

/// Submitted book form; `genre` may repeat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}
