use std::collections::{HashMap, HashSet};

use crate::{
    error::AppResult,
    models::{CarouselItem, Genre, Title, TitleView},
    services::stores::CatalogStore,
};

/// Identifier-keyed snapshot of the title catalog for one aggregation
///
/// Loaded fresh for every call; never cached across calls.
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    /// Catalog ids in load order
    ids: Vec<String>,
    views: HashMap<String, TitleView>,
    genre_counts: HashMap<Genre, usize>,
    poster_base_url: String,
}

impl TitleIndex {
    /// Loads the full catalog from the store
    pub async fn load(catalog: &dyn CatalogStore, poster_base_url: &str) -> AppResult<Self> {
        let titles = catalog.get_all_titles().await?;
        Ok(Self::from_titles(&titles, poster_base_url))
    }

    pub fn from_titles(titles: &[Title], poster_base_url: &str) -> Self {
        let mut index = Self {
            ids: Vec::with_capacity(titles.len()),
            views: HashMap::with_capacity(titles.len()),
            genre_counts: HashMap::new(),
            poster_base_url: poster_base_url.trim_end_matches('/').to_string(),
        };

        for title in titles {
            if index.views.contains_key(&title.show_id) {
                tracing::warn!(show_id = %title.show_id, "Duplicate catalog id ignored");
                continue;
            }
            for genre in &title.genres {
                *index.genre_counts.entry(*genre).or_default() += 1;
            }
            index.ids.push(title.show_id.clone());
            index
                .views
                .insert(title.show_id.clone(), TitleView::from(title));
        }

        index
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Display name of a show, if it resolves
    pub fn title_of(&self, show_id: &str) -> Option<&str> {
        self.views.get(show_id).map(|view| view.title.as_str())
    }

    /// Catalog ids in load order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of catalog titles flagged with `genre`
    pub fn genre_count(&self, genre: Genre) -> usize {
        self.genre_counts.get(&genre).copied().unwrap_or(0)
    }

    /// Resolves ids into display items, preserving input order
    ///
    /// Ids missing from the catalog are dropped, as are repeats of an id
    /// already emitted.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<CarouselItem> {
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(ids.len());

        for id in ids {
            let id = id.as_ref();
            let Some(view) = self.views.get(id) else {
                tracing::debug!(show_id = %id, "Dropping unresolvable show id");
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            items.push(self.item(view));
        }

        items
    }

    fn item(&self, view: &TitleView) -> CarouselItem {
        CarouselItem {
            show_id: view.id.clone(),
            title: view.title.clone(),
            description: view.description.clone(),
            image_url: format!("{}/{}.jpg", self.poster_base_url, view.title),
        }
    }
}
