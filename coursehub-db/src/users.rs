//! Queries against the `users` table.

use serde::Serialize;
use sqlx::Executor;

use crate::DbBackend;

#[cfg(not(feature = "postgres"))]
const FIND_BY_EMAIL: &str =
    "SELECT id, email, hashed_password FROM users WHERE email = ? LIMIT 1";
#[cfg(feature = "postgres")]
const FIND_BY_EMAIL: &str =
    "SELECT id, email, hashed_password FROM users WHERE email = $1 LIMIT 1";

#[cfg(not(feature = "postgres"))]
const INSERT: &str = "INSERT INTO users (email, hashed_password) VALUES (?, ?)";
#[cfg(feature = "postgres")]
const INSERT: &str = "INSERT INTO users (email, hashed_password) VALUES ($1, $2)";

/// A row of the `users` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
}

/// Fetch the first user whose email equals `email` exactly.
///
/// Case sensitivity follows the column collation of the backing database.
pub async fn find_first_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    sqlx::query_as::<_, User>(FIND_BY_EMAIL)
        .bind(email)
        .fetch_optional(executor)
        .await
}

/// Insert a user with an already hashed password.
pub async fn insert<'e, E>(executor: E, email: &str, hashed_password: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = DbBackend>,
{
    sqlx::query(INSERT)
        .bind(email)
        .bind(hashed_password)
        .execute(executor)
        .await?;
    Ok(())
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::{create_pool, DbConnectionConfig};

    async fn pool_with_users() -> crate::DbPool {
        let cfg = DbConnectionConfig::new("sqlite::memory:").with_max_connections(1);
        let pool = create_pool(&cfg).await.expect("create pool");
        sqlx::query(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, email TEXT NOT NULL UNIQUE, hashed_password TEXT NOT NULL)",
        )
        .execute(&pool)
        .await
        .expect("create table");
        pool
    }

    #[tokio::test]
    async fn finds_inserted_user_by_exact_email() {
        let pool = pool_with_users().await;
        insert(&pool, "a@x.com", "$2b$04$digest").await.expect("insert");

        let user = find_first_by_email(&pool, "a@x.com")
            .await
            .expect("query")
            .expect("user present");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.hashed_password, "$2b$04$digest");

        let missing = find_first_by_email(&pool, "b@x.com").await.expect("query");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let pool = pool_with_users().await;
        insert(&pool, "a@x.com", "h1").await.expect("first insert");
        assert!(insert(&pool, "a@x.com", "h2").await.is_err());
    }

    #[test]
    fn serialized_user_omits_hash() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
            hashed_password: "secret-digest".into(),
        };
        let json = serde_json::to_value(&user).expect("serialize");
        assert_eq!(json, serde_json::json!({"id": 1, "email": "a@x.com"}));
    }
}
