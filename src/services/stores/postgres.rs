use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    error::AppResult,
    models::{
        Genre, Rating, RecommendationRow, RecommendationTable, StreamingService,
        Title, UserId, UserPreferences,
    },
    services::stores::{CatalogStore, RatingStore, RecommendationStore, UserStore},
};

/// Postgres-backed collaborator reads
///
/// Flag columns are spliced into query text from the static `Genre` and
/// `StreamingService` enumerations. Caller-supplied values (user ids, show
/// ids, service names) are always bound.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct RatingRow {
    user_id: i32,
    show_id: String,
    rating: i32,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating::new(row.user_id, row.show_id, row.rating)
    }
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn column_list<'a>(columns: impl Iterator<Item = &'a str>) -> String {
        columns.collect::<Vec<_>>().join(", ")
    }

    fn genre_columns() -> String {
        Self::column_list(Genre::ALL.iter().map(|g| g.column()))
    }

    fn service_columns() -> String {
        Self::column_list(StreamingService::ALL.iter().map(|s| s.column()))
    }

    /// Reads a nullable boolean flag column, treating NULL as false
    fn flag(row: &PgRow, column: &str) -> Result<bool, sqlx::Error> {
        Ok(row.try_get::<Option<bool>, _>(column)?.unwrap_or(false))
    }

    fn title_from_row(row: &PgRow) -> Result<Title, sqlx::Error> {
        let mut genres = Vec::new();
        for genre in Genre::ALL {
            if Self::flag(row, genre.column())? {
                genres.push(*genre);
            }
        }

        Ok(Title {
            show_id: row.try_get("show_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            release_year: row.try_get("release_year")?,
            genres,
        })
    }

    fn preferences_from_row(row: &PgRow) -> Result<UserPreferences, sqlx::Error> {
        let user_id: i32 = row.try_get("user_id")?;
        let name: Option<String> = row.try_get("name")?;

        let mut preferences = UserPreferences::new(user_id, name.unwrap_or_default());
        preferences.favorite_show_id = row.try_get("favorite_movie")?;

        for genre in Genre::ALL {
            if Self::flag(row, genre.column())? {
                preferences.genres.insert(*genre);
            }
        }
        for service in StreamingService::ALL {
            if Self::flag(row, service.column())? {
                preferences.services.insert(*service);
            }
        }

        Ok(preferences)
    }
}

#[async_trait::async_trait]
impl CatalogStore for PgStore {
    async fn get_all_titles(&self) -> AppResult<Vec<Title>> {
        let sql = format!(
            r#"SELECT show_id, title, description, release_year, {} FROM movies_titles"#,
            Self::genre_columns()
        );

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let titles = rows
            .iter()
            .map(Self::title_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(titles = titles.len(), "Loaded title catalog");

        Ok(titles)
    }
}

#[async_trait::async_trait]
impl RatingStore for PgStore {
    async fn get_ratings_for_user(&self, user_id: UserId) -> AppResult<Vec<Rating>> {
        let rows = sqlx::query_as::<_, RatingRow>(
            r#"
            SELECT user_id, show_id, rating
            FROM movies_ratings
            WHERE user_id = $1
            ORDER BY rating DESC, show_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }
}

#[async_trait::async_trait]
impl UserStore for PgStore {
    async fn get_user_preferences(&self, user_id: UserId) -> AppResult<Option<UserPreferences>> {
        let sql = format!(
            "SELECT user_id, name, favorite_movie, {}, {} FROM movies_users WHERE user_id = $1",
            Self::service_columns(),
            Self::genre_columns()
        );

        let row = sqlx::query(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::preferences_from_row).transpose()?)
    }
}

#[async_trait::async_trait]
impl RecommendationStore for PgStore {
    async fn get_row(
        &self,
        table: &RecommendationTable,
        subject_key: &str,
    ) -> AppResult<Option<RecommendationRow>> {
        let columns: Vec<String> = (1..=table.slot_count())
            .map(RecommendationTable::slot_column)
            .collect();
        let sql = format!(
            "SELECT {} FROM {} WHERE subject_key = $1 LIMIT 1",
            columns.join(", "),
            table.name()
        );

        let row = sqlx::query(&sql)
            .bind(subject_key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let slots = columns
            .iter()
            .map(|column| row.try_get::<Option<String>, _>(column.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(RecommendationRow::new(slots)))
    }
}
