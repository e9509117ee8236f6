use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

use crate::{
    config::CarouselSettings,
    error::{AppError, AppResult},
    models::{CarouselItem, CarouselSet, RecommendationTable, UserId},
    services::{
        row_reader::RowReader,
        sections::{self, SectionContext},
        stores::Stores,
        title_resolver::TitleIndex,
    },
};

/// Assembles a user's home screen from precomputed recommendation sources
///
/// Stateless between calls: every aggregation reloads the user, the catalog
/// and the rating history, then runs the section providers in fixed
/// priority order:
///
/// 1. Global-Recommended
/// 2. Favorite-Movie-Similar
/// 3. Liked-Show-Similar (one per liked show)
/// 4. Genre-Interest (one per flagged genre)
/// 5. Streaming-Service-Popularity (one per flagged service)
/// 6. Discovery-Filler (always last, always present)
///
/// Row-backed sections 1-5 share one lookup stream, so at most
/// `row_fetch_concurrency` row reads are in flight per call. Any store
/// failure aborts the whole call; no partial set is returned. Nothing is
/// spawned, so dropping the returned future cancels every in-flight lookup.
#[derive(Clone)]
pub struct CarouselBuilder {
    stores: Stores,
    reader: RowReader,
    settings: CarouselSettings,
}

impl CarouselBuilder {
    pub fn new(stores: Stores, settings: CarouselSettings) -> Self {
        let reader = RowReader::new(stores.rows.clone());
        Self {
            stores,
            reader,
            settings,
        }
    }

    /// Builds the full carousel set for `user_id`
    ///
    /// Fails with `NotFound` when the user does not exist.
    pub async fn build_carousel_set(&self, user_id: UserId) -> AppResult<CarouselSet> {
        let start = Instant::now();

        let preferences = self
            .stores
            .users
            .get_user_preferences(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let (catalog, ratings) = tokio::try_join!(
            TitleIndex::load(self.stores.catalog.as_ref(), &self.settings.poster_base_url),
            self.stores.ratings.get_ratings_for_user(user_id),
        )?;

        tracing::debug!(
            user_id,
            catalog_size = catalog.len(),
            ratings = ratings.len(),
            "Loaded aggregation inputs"
        );

        let ctx = SectionContext {
            reader: &self.reader,
            catalog: &catalog,
            preferences: &preferences,
            ratings: &ratings,
            concurrency: self.settings.row_fetch_concurrency,
        };

        let planned = sections::plan(&ctx);
        tracing::debug!(user_id, sections = planned.len(), "Planned row sections");

        let mut carousels = ctx.fan_out(planned).await?;

        let discovery = sections::discovery_filler(
            &catalog,
            &ratings,
            self.settings.discovery_sample_size,
            &mut StdRng::from_entropy(),
        );
        carousels.push(discovery);

        tracing::info!(
            user_id,
            carousels = carousels.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built carousel set"
        );

        Ok(CarouselSet {
            display_name: preferences.display_name,
            carousels,
        })
    }

    /// Resolved items similar to one show, from the per-show table
    ///
    /// Returns an empty list when the show has no row.
    pub async fn similar_to_show(&self, show_id: &str) -> AppResult<Vec<CarouselItem>> {
        let table = RecommendationTable::show_similar();
        let (catalog, ids) = tokio::try_join!(
            TitleIndex::load(self.stores.catalog.as_ref(), &self.settings.poster_base_url),
            self.reader.read_row(&table, show_id),
        )?;

        Ok(catalog.resolve(&ids))
    }

    /// Loads a fresh catalog snapshot
    pub async fn catalog(&self) -> AppResult<TitleIndex> {
        TitleIndex::load(self.stores.catalog.as_ref(), &self.settings.poster_base_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, Rating, RecommendationRow, StreamingService, Title, UserPreferences};
    use crate::services::sections::{DISCOVERY_TITLE, GLOBAL_RECOMMENDED_TITLE};
    use crate::services::stores::{
        MemoryStore, MockCatalogStore, MockRatingStore, MockRecommendationStore, MockUserStore,
    };
    use crate::services::stores::RecommendationStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn settings() -> CarouselSettings {
        CarouselSettings {
            discovery_sample_size: 20,
            row_fetch_concurrency: 4,
            poster_base_url: "/Movie Posters".to_string(),
        }
    }

    fn builder(store: MemoryStore) -> CarouselBuilder {
        CarouselBuilder::new(Stores::from_backend(Arc::new(store)), settings())
    }

    fn catalog_store() -> MemoryStore {
        (1..=50).fold(MemoryStore::new(), |store, i| {
            store.with_title(Title::new(format!("s{}", i), format!("Show {}", i)))
        })
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let result = builder(catalog_store()).build_carousel_set(99).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_no_signal_user_gets_global_then_discovery() {
        let store = catalog_store()
            .with_user(UserPreferences::new(1, "Ada"))
            .with_row(
                &RecommendationTable::top_picks(),
                "1",
                RecommendationRow::from_ids(["s1", "s2", "s3"]),
            );

        let set = builder(store).build_carousel_set(1).await.unwrap();
        assert_eq!(set.display_name, "Ada");
        assert_eq!(set.titles(), vec![GLOBAL_RECOMMENDED_TITLE, DISCOVERY_TITLE]);
        assert_eq!(set.carousels[1].items.len(), 20);
    }

    #[tokio::test]
    async fn test_discovery_is_last_even_when_alone() {
        let store = MemoryStore::new().with_user(UserPreferences::new(1, "Ada"));

        let set = builder(store).build_carousel_set(1).await.unwrap();
        assert_eq!(set.titles(), vec![DISCOVERY_TITLE]);
        assert!(set.carousels[0].items.is_empty());
    }

    #[tokio::test]
    async fn test_services_follow_genres() {
        let store = catalog_store()
            .with_user(
                UserPreferences::new(1, "Ada")
                    .with_service(StreamingService::Hulu)
                    .with_service(StreamingService::Netflix)
                    .with_genre(Genre::Dramas),
            )
            .with_row(
                &RecommendationTable::service_popularity(),
                "Netflix",
                RecommendationRow::from_ids(["s1"]),
            )
            .with_row(
                &RecommendationTable::service_popularity(),
                "Hulu",
                RecommendationRow::from_ids(["s2"]),
            )
            .with_row(
                &RecommendationTable::genre(Genre::Dramas),
                "1",
                RecommendationRow::from_ids(["s3"]),
            );

        let set = builder(store).build_carousel_set(1).await.unwrap();
        assert_eq!(
            set.titles(),
            vec![
                "Dramas You Might Like",
                "Popular on Netflix",
                "Popular on Hulu",
                DISCOVERY_TITLE,
            ]
        );
    }

    #[tokio::test]
    async fn test_user_lookup_failure_aborts() {
        let mut users = MockUserStore::new();
        users
            .expect_get_user_preferences()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        let mut catalog = MockCatalogStore::new();
        catalog.expect_get_all_titles().never();
        let mut ratings = MockRatingStore::new();
        ratings.expect_get_ratings_for_user().never();
        let mut rows = MockRecommendationStore::new();
        rows.expect_get_row().never();

        let stores = Stores {
            catalog: Arc::new(catalog),
            ratings: Arc::new(ratings),
            users: Arc::new(users),
            rows: Arc::new(rows),
        };

        let result = CarouselBuilder::new(stores, settings())
            .build_carousel_set(1)
            .await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_ratings_failure_aborts() {
        let mut users = MockUserStore::new();
        users
            .expect_get_user_preferences()
            .returning(|id| Ok(Some(UserPreferences::new(id, "Ada"))));
        let mut catalog = MockCatalogStore::new();
        catalog
            .expect_get_all_titles()
            .returning(|| Ok(vec![Title::new("s1", "Alien")]));
        let mut ratings = MockRatingStore::new();
        ratings
            .expect_get_ratings_for_user()
            .returning(|_| Err(AppError::Internal("ratings store unreachable".into())));
        let mut rows = MockRecommendationStore::new();
        rows.expect_get_row().returning(|_, _| Ok(None));

        let stores = Stores {
            catalog: Arc::new(catalog),
            ratings: Arc::new(ratings),
            users: Arc::new(users),
            rows: Arc::new(rows),
        };

        let result = CarouselBuilder::new(stores, settings())
            .build_carousel_set(1)
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_unsafe_favorite_key_is_an_error_not_a_missing_row() {
        let store = MemoryStore::new()
            .with_title(Title::new("s1\u{7}", "Bell"))
            .with_user(UserPreferences::new(1, "Ada").with_favorite("s1\u{7}"));

        let result = builder(store).build_carousel_set(1).await;
        assert!(matches!(result, Err(AppError::UnsafeSubjectKey(_))));
    }

    #[tokio::test]
    async fn test_similar_to_show() {
        let store = catalog_store().with_row(
            &RecommendationTable::show_similar(),
            "s1",
            RecommendationRow::from_ids(["s2", "s404", "s3"]),
        );
        let builder = builder(store);

        let items = builder.similar_to_show("s1").await.unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.show_id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s3"]);

        assert!(builder.similar_to_show("s9").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_liked_show_below_threshold_has_no_section() {
        let store = catalog_store()
            .with_user(UserPreferences::new(1, "Ada"))
            .with_rating(Rating::new(1, "s5", 3))
            .with_row(
                &RecommendationTable::show_similar(),
                "s5",
                RecommendationRow::from_ids(["s6"]),
            );

        let set = builder(store).build_carousel_set(1).await.unwrap();
        assert_eq!(set.titles(), vec![DISCOVERY_TITLE]);
    }

    /// Counts row lookups running at once
    #[derive(Default)]
    struct InFlightStore {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RecommendationStore for InFlightStore {
        async fn get_row(
            &self,
            _table: &RecommendationTable,
            _subject_key: &str,
        ) -> AppResult<Option<RecommendationRow>> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Some(RecommendationRow::from_ids(["s1"])))
        }
    }

    #[tokio::test]
    async fn test_row_lookups_never_exceed_configured_bound() {
        let mut prefs = UserPreferences::new(1, "Ada");
        for genre in &Genre::ALL[..4] {
            prefs = prefs.with_genre(*genre);
        }
        for service in &StreamingService::ALL[..4] {
            prefs = prefs.with_service(*service);
        }
        let mut backend = catalog_store().with_user(prefs);
        for i in 2..=5 {
            backend = backend.with_rating(Rating::new(1, format!("s{}", i), 5));
        }
        let backend = Arc::new(backend);
        let rows = Arc::new(InFlightStore::default());

        let stores = Stores {
            catalog: backend.clone(),
            ratings: backend.clone(),
            users: backend,
            rows: rows.clone(),
        };
        let settings = CarouselSettings {
            row_fetch_concurrency: 1,
            ..settings()
        };

        let set = CarouselBuilder::new(stores, settings)
            .build_carousel_set(1)
            .await
            .unwrap();

        // global + 4 liked + 4 genres + 4 services + discovery
        assert_eq!(set.carousels.len(), 14);
        assert_eq!(rows.peak.load(Ordering::SeqCst), 1);
    }
}
