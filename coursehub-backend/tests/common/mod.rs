#![allow(dead_code)]

use std::sync::Arc;

use coursehub_auth::PasswordContext;
use coursehub_backend::state::AppState;
use coursehub_db::{create_pool, DbConnectionConfig, DbPool};

/// Cheapest cost bcrypt accepts; keeps the suite fast.
pub const TEST_COST: u32 = 4;

pub fn passwords() -> PasswordContext {
    PasswordContext::new()
        .with_bcrypt_cost(TEST_COST)
        .expect("valid cost")
}

/// Single-connection in-memory sqlite pool with the schema applied.
///
/// Each in-memory connection is its own database, so the pool must not open a
/// second one or drop the first.
pub async fn migrated_pool() -> DbPool {
    let mut cfg = DbConnectionConfig::new("sqlite::memory:").with_max_connections(1);
    cfg.idle_timeout_secs = None;
    let pool = create_pool(&cfg).await.expect("create pool");
    coursehub_migrations::sqlite_migrator()
        .run(&pool)
        .await
        .expect("migrate");
    pool
}

pub async fn insert_user(pool: &DbPool, email: &str, password: &str) {
    let hash = passwords().hash(password).expect("hash");
    coursehub_db::users::insert(pool, email, &hash)
        .await
        .expect("insert user");
}

/// State backed by a pool holding the given users.
pub async fn state_with_users(users: &[(&str, &str)]) -> Arc<AppState> {
    let pool = migrated_pool().await;
    for (email, password) in users {
        insert_user(&pool, email, password).await;
    }
    Arc::new(AppState::new(pool, passwords()))
}
