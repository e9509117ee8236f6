use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Genre, StreamingService, UserId};

/// Per-user inclusion inputs for carousel aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    pub user_id: UserId,
    /// Name shown above the carousels
    pub display_name: String,
    /// May dangle if the title was removed from the catalog
    pub favorite_show_id: Option<String>,
    pub genres: BTreeSet<Genre>,
    pub services: BTreeSet<StreamingService>,
}

impl UserPreferences {
    /// Creates preferences with no favorite and every flag unset
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            favorite_show_id: None,
            genres: BTreeSet::new(),
            services: BTreeSet::new(),
        }
    }

    pub fn with_favorite(mut self, show_id: impl Into<String>) -> Self {
        self.favorite_show_id = Some(show_id.into());
        self
    }

    pub fn with_genre(mut self, genre: Genre) -> Self {
        self.genres.insert(genre);
        self
    }

    pub fn with_service(mut self, service: StreamingService) -> Self {
        self.services.insert(service);
        self
    }

    /// Favorite show id, ignoring blank values left behind by the profile form
    pub fn favorite(&self) -> Option<&str> {
        self.favorite_show_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Genres flagged true, in fixed enumeration order
    pub fn interested_genres(&self) -> impl Iterator<Item = Genre> + '_ {
        Genre::ALL
            .iter()
            .copied()
            .filter(|genre| self.genres.contains(genre))
    }

    /// Services flagged true, in fixed enumeration order
    pub fn subscribed_services(&self) -> impl Iterator<Item = StreamingService> + '_ {
        StreamingService::ALL
            .iter()
            .copied()
            .filter(|service| self.services.contains(service))
    }
}
