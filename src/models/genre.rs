//! Genre model

use serde::{Deserialize, Serialize};

use crate::repository::{new_id, Document};

/// Book category, referenced by `Book::genre`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

impl Document for Genre {
    const COLLECTION: &'static str = "genres";
    const LABEL: &'static str = "Genre";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Submitted genre form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}
