//! Bearer-token storage and validation
//!
//! Token issuance endpoints are out of scope; tokens are provisioned
//! out-of-band and only their SHA-256 hash is stored. The API's auth
//! middleware resolves `Authorization: Bearer <token>` through
//! [`authenticate_token`].

use crate::db::models::User;
use crate::Result;
use chrono::Utc;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

/// SHA-256 hex digest of a plaintext token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Store a token for a user. The plaintext is hashed; it is never persisted.
pub async fn store_token(pool: &SqlitePool, user_id: i64, token: &str, name: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO api_tokens (user_id, token_hash, name, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(hash_token(token))
    .bind(name)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Resolve a presented bearer token to its owning user, if any
pub async fn authenticate_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.id, u.email, u.created_at \
         FROM api_tokens t JOIN users u ON u.id = t.user_id \
         WHERE t.token_hash = ?",
    )
    .bind(hash_token(token))
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;
    use crate::db::users::insert_user;

    #[test]
    fn hash_is_hex_sha256() {
        let hash = hash_token("secret-token");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic
        assert_eq!(hash, hash_token("secret-token"));
    }

    #[tokio::test]
    async fn stored_token_authenticates_its_owner() {
        let pool = init_memory_database().await.unwrap();
        let user = insert_user(&pool, "owner@example.com").await.unwrap();
        store_token(&pool, user.id, "tok-123", "cli").await.unwrap();

        let resolved = authenticate_token(&pool, "tok-123").await.unwrap();
        assert_eq!(resolved.unwrap().id, user.id);

        let unknown = authenticate_token(&pool, "tok-999").await.unwrap();
        assert!(unknown.is_none());
    }
}
