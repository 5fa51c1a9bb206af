use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Applies pending migrations and returns how many were applied.
pub async fn run_pending(pool: &DbPool) -> Result<usize, MigrateError> {
    let before = applied_count(pool).await;
    MIGRATOR.run(pool).await?;
    Ok(applied_count(pool).await.saturating_sub(before))
}

/// Zero before the first run, when the bookkeeping table does not exist yet.
async fn applied_count(pool: &DbPool) -> usize {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .map(|count| count as usize)
        .unwrap_or(0)
}
