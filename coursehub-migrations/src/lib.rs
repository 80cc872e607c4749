//! Embedded schema migrations, one directory per supported driver.

use sqlx::migrate::Migrator;

pub static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("src/migrations_sqlite");
pub static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("src/migrations_postgres");
pub static MYSQL_MIGRATOR: Migrator = sqlx::migrate!("src/migrations_mysql");

pub fn sqlite_migrator() -> &'static Migrator {
    &SQLITE_MIGRATOR
}

pub fn postgres_migrator() -> &'static Migrator {
    &POSTGRES_MIGRATOR
}

pub fn mysql_migrator() -> &'static Migrator {
    &MYSQL_MIGRATOR
}

/// Pick the migrator matching a connection URL's scheme. Anything that is not
/// Postgres or MySQL is treated as SQLite.
pub fn migrator_for_url(url: &str) -> &'static Migrator {
    let url = url.trim_start().to_ascii_lowercase();
    if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        postgres_migrator()
    } else if url.starts_with("mysql:") || url.starts_with("mariadb:") {
        mysql_migrator()
    } else {
        sqlite_migrator()
    }
}
