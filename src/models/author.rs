//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::format_date;
use crate::repository::{new_id, Document};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn new(
        first_name: impl Into<String>,
        family_name: impl Into<String>,
        date_of_birth: Option<NaiveDate>,
        date_of_death: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: new_id(),
            first_name: first_name.into(),
            family_name: family_name.into(),
            date_of_birth,
            date_of_death,
        }
    }

    /// "Family, First", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", self.family_name, self.first_name)
        }
    }

    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_date).unwrap_or_default();
        let death = self.date_of_death.map(format_date).unwrap_or_default();
        if birth.is_empty() && death.is_empty() {
            String::new()
        } else {
            format!("{} - {}", birth, death)
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn view(&self) -> AuthorView<'_> {
        AuthorView {
            author: self,
            name: self.name(),
            lifespan: self.lifespan(),
        }
    }
}

impl Document for Author {
    const COLLECTION: &'static str = "authors";
    const LABEL: &'static str = "Author";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Author as handed to templates, with its derived fields
#[derive(Debug, Serialize)]
pub struct AuthorView<'a> {
    #[serde(flatten)]
    pub author: &'a Author,
    pub name: String,
    pub lifespan: String,
}

/// Submitted author form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}
