use sqlx::{postgres::PgPoolOptions, PgPool};

/// Creates the PostgreSQL pool used for catalog reads
///
/// Applies the embedded migrations before returning.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
