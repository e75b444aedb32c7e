//! Database initialization
//!
//! Creates the database file on first run and brings the schema up
//! idempotently: every `CREATE TABLE IF NOT EXISTS` is safe to re-run on an
//! existing database. Catalog seeding only fires when the tables are empty.

use crate::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Initialize the database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    configure_connection(&pool).await?;
    create_schema(&pool).await?;
    super::catalog::seed_catalog(&pool).await?;

    Ok(pool)
}

/// Initialize an in-memory database with the full schema and seed catalog.
///
/// Single-connection pool: each SQLite `:memory:` connection is its own
/// database, so the pool must never open a second one.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    configure_connection(&pool).await?;
    create_schema(&pool).await?;
    super::catalog::seed_catalog(&pool).await?;

    Ok(pool)
}

async fn configure_connection(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers while a submission is writing
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    Ok(())
}

/// Create all tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_users_table(pool).await?;
    create_api_tokens_table(pool).await?;
    create_categories_table(pool).await?;
    create_levels_table(pool).await?;
    create_challenges_table(pool).await?;
    create_practice_sessions_table(pool).await?;
    create_practice_results_table(pool).await?;
    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_api_tokens_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS api_tokens (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            token_hash TEXT NOT NULL UNIQUE,
            name TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_categories_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            parent_id INTEGER REFERENCES categories(id) ON DELETE CASCADE,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT,
            icon TEXT,
            sort_order INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_levels_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS levels (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT,
            color TEXT,
            min_score INTEGER NOT NULL DEFAULT 0,
            sort_order INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_challenges_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS challenges (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            level_id INTEGER NOT NULL REFERENCES levels(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            suggested_time_minutes INTEGER NOT NULL,
            hints_available INTEGER NOT NULL DEFAULT 0,
            tips TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_practice_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS practice_sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            challenge_id INTEGER NOT NULL REFERENCES challenges(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            started_at TEXT NOT NULL,
            completed_at TEXT,
            status TEXT NOT NULL DEFAULT 'started'
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn create_practice_results_table(pool: &SqlitePool) -> Result<()> {
    // One result per session: the UNIQUE constraint backs the reject-on-
    // resubmission behavior of the recording pipeline.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS practice_results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            practice_session_id INTEGER NOT NULL UNIQUE
                REFERENCES practice_sessions(id) ON DELETE CASCADE,
            transcription TEXT NOT NULL DEFAULT '',
            feedback TEXT NOT NULL DEFAULT '',
            improved_text TEXT,
            score REAL NOT NULL DEFAULT 0,
            metadata TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let pool = init_memory_database().await.unwrap();
        create_schema(&pool).await.unwrap();
        create_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn fresh_database_has_seeded_catalog() {
        let pool = init_memory_database().await.unwrap();

        let (levels,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM levels")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (categories,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&pool)
            .await
            .unwrap();
        let (challenges,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM challenges")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(levels, 3);
        assert!(categories > 0);
        assert!(challenges > 0);
    }

    #[tokio::test]
    async fn result_rows_are_unique_per_session() {
        let pool = init_memory_database().await.unwrap();

        let user = crate::db::users::insert_user(&pool, "dup@example.com")
            .await
            .unwrap();
        let challenge = crate::db::catalog::first_challenge(&pool).await.unwrap();
        let session =
            crate::db::sessions::create_session(&pool, user.id, challenge.id, Some("S".into()))
                .await
                .unwrap();

        const INSERT: &str = "INSERT INTO practice_results \
             (practice_session_id, transcription, feedback, score, metadata, created_at) \
             VALUES (?, '', '', 0, '{}', ?)";

        sqlx::query(INSERT)
            .bind(session.id)
            .bind(chrono::Utc::now())
            .execute(&pool)
            .await
            .unwrap();

        let second = sqlx::query(INSERT)
            .bind(session.id)
            .bind(chrono::Utc::now())
            .execute(&pool)
            .await;
        assert!(second.is_err());
    }
}
