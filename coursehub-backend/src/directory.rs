//! SQL-backed user directory.

use coursehub_auth::{AuthError, UserDirectory, UserRecord};
use coursehub_db::{users as db_users, DbBackend, DbPool};
use sqlx::pool::PoolConnection;

/// A user directory holding one pooled connection.
///
/// The connection goes back to the pool when this value is dropped, whichever
/// way the request ends.
pub struct SqlUserDirectory {
    conn: PoolConnection<DbBackend>,
}

impl SqlUserDirectory {
    /// Acquire a connection for the current request.
    pub async fn acquire(pool: &DbPool) -> Result<Self, AuthError> {
        let conn = pool.acquire().await.map_err(|e| {
            tracing::error!(error = %e, "failed to acquire database connection");
            AuthError::DirectoryUnavailable(e.to_string())
        })?;
        Ok(Self { conn })
    }
}

#[async_trait::async_trait]
impl UserDirectory for SqlUserDirectory {
    async fn find_by_email(&mut self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let user = db_users::find_first_by_email(&mut *self.conn, email)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "user lookup failed");
                AuthError::DirectoryUnavailable(e.to_string())
            })?;
        Ok(user.map(|u| UserRecord {
            email: u.email,
            hashed_password: u.hashed_password,
        }))
    }
}
