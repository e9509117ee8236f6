use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates a PostgreSQL connection pool
///
/// The carousel engine only reads, so the pool is shared by every
/// aggregation call without any transaction handling.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the bundled schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
