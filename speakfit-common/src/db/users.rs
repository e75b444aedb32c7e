//! User rows
//!
//! Account management (registration, login, profile) is out of scope for
//! this service; users are provisioned out-of-band. Sessions and tokens
//! still need an owner row to reference.

use crate::db::models::User;
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

pub async fn insert_user(pool: &SqlitePool, email: &str) -> Result<User> {
    let result = sqlx::query("INSERT INTO users (email, created_at) VALUES (?, ?)")
        .bind(email)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    fetch_user(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| crate::Error::Internal("Inserted user row not found".to_string()))
}

pub async fn fetch_user(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn insert_and_fetch_round_trip() {
        let pool = init_memory_database().await.unwrap();
        let user = insert_user(&pool, "someone@example.com").await.unwrap();

        let fetched = fetch_user(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "someone@example.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = init_memory_database().await.unwrap();
        insert_user(&pool, "dup@example.com").await.unwrap();
        assert!(insert_user(&pool, "dup@example.com").await.is_err());
    }
}
