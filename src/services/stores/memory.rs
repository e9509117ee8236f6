use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{Rating, RecommendationRow, RecommendationTable, Title, UserId, UserPreferences},
    services::stores::{CatalogStore, RatingStore, RecommendationStore, UserStore},
};

/// In-memory collaborator reads for tests and local fixtures
///
/// Built up front with the `with_*` methods and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    titles: Vec<Title>,
    users: HashMap<UserId, UserPreferences>,
    ratings: Vec<Rating>,
    rows: HashMap<(String, String), RecommendationRow>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a title, replacing any title with the same id
    pub fn with_title(mut self, title: Title) -> Self {
        self.titles.retain(|t| t.show_id != title.show_id);
        self.titles.push(title);
        self
    }

    pub fn with_user(mut self, preferences: UserPreferences) -> Self {
        self.users.insert(preferences.user_id, preferences);
        self
    }

    /// Records a rating; re-rating a show overwrites in place
    pub fn with_rating(mut self, rating: Rating) -> Self {
        match self
            .ratings
            .iter_mut()
            .find(|r| r.user_id == rating.user_id && r.show_id == rating.show_id)
        {
            Some(existing) => existing.rating = rating.rating,
            None => self.ratings.push(rating),
        }
        self
    }

    pub fn with_row(
        mut self,
        table: &RecommendationTable,
        subject_key: impl Into<String>,
        row: RecommendationRow,
    ) -> Self {
        self.rows
            .insert((table.name().to_string(), subject_key.into()), row);
        self
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryStore {
    async fn get_all_titles(&self) -> AppResult<Vec<Title>> {
        Ok(self.titles.clone())
    }
}

#[async_trait::async_trait]
impl RatingStore for MemoryStore {
    async fn get_ratings_for_user(&self, user_id: UserId) -> AppResult<Vec<Rating>> {
        Ok(self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn get_user_preferences(&self, user_id: UserId) -> AppResult<Option<UserPreferences>> {
        Ok(self.users.get(&user_id).cloned())
    }
}

#[async_trait::async_trait]
impl RecommendationStore for MemoryStore {
    async fn get_row(
        &self,
        table: &RecommendationTable,
        subject_key: &str,
    ) -> AppResult<Option<RecommendationRow>> {
        Ok(self
            .rows
            .get(&(table.name().to_string(), subject_key.to_string()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rerating_overwrites() {
        let store = MemoryStore::new()
            .with_rating(Rating::new(1, "s1", 2))
            .with_rating(Rating::new(1, "s2", 3))
            .with_rating(Rating::new(1, "s1", 5));

        let ratings = store.get_ratings_for_user(1).await.unwrap();
        assert_eq!(
            ratings,
            vec![Rating::new(1, "s1", 5), Rating::new(1, "s2", 3)]
        );
    }

    #[tokio::test]
    async fn test_rows_are_keyed_by_table_and_subject() {
        let table = RecommendationTable::show_similar();
        let store = MemoryStore::new().with_row(&table, "s1", RecommendationRow::from_ids(["s2"]));

        assert!(store.get_row(&table, "s1").await.unwrap().is_some());
        assert!(store.get_row(&table, "s2").await.unwrap().is_none());
        assert!(store
            .get_row(&RecommendationTable::top_picks(), "s1")
            .await
            .unwrap()
            .is_none());
    }
}
