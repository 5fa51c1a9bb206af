use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use glowguide_core::config::DatabaseConfig;

pub type DbPool = sqlx::SqlitePool;

/// Connects with the pool sizing `DatabaseConfig` defaults to.
pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    connect_with_settings(database_url, 5, 30).await
}

/// Connects using the `[database]` section of the app config.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    connect_with_settings(&config.url, config.max_connections, config.timeout_secs).await
}

/// The store serves one CLI invocation at a time; WAL plus a busy timeout
/// keeps an overlapping invocation waiting on the lock instead of failing.
pub async fn connect_with_settings(
    database_url: &str,
    max_connections: u32,
    timeout_secs: u64,
) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(timeout_secs.max(1)))
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use glowguide_core::config::DatabaseConfig;

    use super::{connect, connect_with};

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = connect("sqlite::memory:").await.expect("in-memory connect");

        let row =
            sqlx::query("PRAGMA foreign_keys").fetch_one(&pool).await.expect("pragma query");
        let enabled: i64 = row.get(0);
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn connect_with_uses_config_section() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 2,
            timeout_secs: 5,
        };

        let pool = connect_with(&config).await.expect("connect from config");
        assert!(pool.acquire().await.is_ok());
    }
}
