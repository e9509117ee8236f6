//! Read-only collaborator seams of the carousel engine
//!
//! The aggregation core never talks to a database directly. It reads the
//! title catalog, rating history, user preferences and precomputed
//! recommendation rows through the traits below, so the same pipeline runs
//! against Postgres in production and against `MemoryStore` in tests.

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Rating, RecommendationRow, RecommendationTable, Title, UserId, UserPreferences},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[cfg(test)]
use mockall::automock;

/// Title catalog reads
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every title in the catalog
    async fn get_all_titles(&self) -> AppResult<Vec<Title>>;
}

/// Rating history reads
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RatingStore: Send + Sync {
    /// All ratings the user has given, in retrieval order
    async fn get_ratings_for_user(&self, user_id: UserId) -> AppResult<Vec<Rating>>;
}

/// User preference reads
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// `None` when the user does not exist
    async fn get_user_preferences(&self, user_id: UserId) -> AppResult<Option<UserPreferences>>;
}

/// Precomputed recommendation row reads
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Fetches the row keyed by `subject_key`, or `None` if there is none
    ///
    /// Implementations must pass `subject_key` as a bound parameter.
    async fn get_row(
        &self,
        table: &RecommendationTable,
        subject_key: &str,
    ) -> AppResult<Option<RecommendationRow>>;
}

/// The four collaborators the carousel builder reads from
#[derive(Clone)]
pub struct Stores {
    pub catalog: Arc<dyn CatalogStore>,
    pub ratings: Arc<dyn RatingStore>,
    pub users: Arc<dyn UserStore>,
    pub rows: Arc<dyn RecommendationStore>,
}

impl Stores {
    /// Uses one backend for every collaborator
    pub fn from_backend<S>(backend: Arc<S>) -> Self
    where
        S: CatalogStore + RatingStore + UserStore + RecommendationStore + 'static,
    {
        Self {
            catalog: backend.clone(),
            ratings: backend.clone(),
            users: backend.clone(),
            rows: backend,
        }
    }
}
