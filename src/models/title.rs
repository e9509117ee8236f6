use serde::{Deserialize, Serialize};

use super::Genre;

/// A catalog entry, owned by the catalog collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Title {
    /// Stable catalog key (e.g. "s123")
    pub show_id: String,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    /// Genre flags set on this title, in enumeration order
    pub genres: Vec<Genre>,
}

impl Title {
    /// Creates a title with no description or genres
    pub fn new(show_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            show_id: show_id.into(),
            title: title.into(),
            description: None,
            release_year: None,
            genres: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        if !self.genres.contains(&genre) {
            self.genres.push(genre);
            self.genres.sort();
        }
        self
    }
}

/// Display metadata the aggregation engine needs for one title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

impl From<&Title> for TitleView {
    fn from(title: &Title) -> Self {
        Self {
            id: title.show_id.clone(),
            title: title.title.clone(),
            description: title.description.clone(),
        }
    }
}
