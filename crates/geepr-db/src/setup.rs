//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` catalog database with full schema. Entry points call this
//! with the resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;

/// Sets up the `SQLite` connection pool and ensures the schema exists.
///
/// Creates the database file (and its parent directory) when missing.
/// Foreign keys are enforced on every connection.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or created, or
/// if schema creation fails.
///
/// # Example
///
/// ```rust,no_run
/// use geepr_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("./geepr.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;
    tracing::debug!("Catalog schema ready at {}", db_path.display());

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// The pool holds a single connection that is never recycled, since every
/// connection to `sqlite::memory:` opens a separate, empty database.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use sqlx::sqlite::SqlitePoolOptions;
    use std::str::FromStr;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true))
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all statements use IF NOT EXISTS.
///
/// Identifiers are 16-byte blobs generated by the store. The `*_normalised`
/// columns hold the upper-cased text that substring filters match against.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id BLOB PRIMARY KEY NOT NULL DEFAULT (randomblob(16)),
            title TEXT NOT NULL,
            title_normalised TEXT GENERATED ALWAYS AS (upper(title)) VIRTUAL,
            description TEXT,
            archived BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS platforms (
            id BLOB PRIMARY KEY NOT NULL DEFAULT (randomblob(16)),
            name TEXT NOT NULL,
            name_normalised TEXT GENERATED ALWAYS AS (upper(name)) VIRTUAL,
            short_name TEXT NOT NULL,
            UNIQUE(name, short_name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game_releases (
            id BLOB PRIMARY KEY NOT NULL DEFAULT (randomblob(16)),
            game_id BLOB NOT NULL REFERENCES games(id),
            title_override TEXT,
            title_override_normalised TEXT GENERATED ALWAYS AS (upper(title_override)) VIRTUAL,
            description TEXT,
            release_date TEXT,
            release_date_unknown BOOLEAN NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Releases are listed per game
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_game_releases_game_id ON game_releases(game_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game_release_platforms (
            game_release_id BLOB NOT NULL REFERENCES game_releases(id),
            platform_id BLOB NOT NULL REFERENCES platforms(id),
            PRIMARY KEY (game_release_id, platform_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // The primary key covers lookups by release; this covers lookups by platform
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_game_release_platforms_platform_id ON game_release_platforms(platform_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_database_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("geepr.db");

        let pool = setup_database(&db_path).await.unwrap();
        assert!(db_path.exists());

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(
            tables,
            vec!["game_release_platforms", "game_releases", "games", "platforms"]
        );
    }

    #[tokio::test]
    async fn test_schema_creation_is_idempotent() {
        let pool = setup_test_database().await.unwrap();
        create_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let pool = setup_test_database().await.unwrap();
        let result = sqlx::query("INSERT INTO game_release_platforms VALUES (randomblob(16), randomblob(16))")
            .execute(&pool)
            .await;
        assert!(result.is_err());
    }
}
