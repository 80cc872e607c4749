use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use coursehub_auth::{DeprecatedPolicy, PasswordContext};
use coursehub_db::DbConnectionConfig;

const ENV_PREFIX: &str = "COURSEHUB";

/// Build the pool configuration.
///
/// A `COURSEHUB_DATABASE_URL` in the environment selects the
/// environment-driven pool settings; otherwise the URL is assembled from the
/// `database` section.
pub fn database_config_from_config(
    cfg: &coursehub_config::Config,
) -> anyhow::Result<DbConnectionConfig> {
    database_config_with_prefix(cfg, ENV_PREFIX)
}

fn database_config_with_prefix(
    cfg: &coursehub_config::Config,
    prefix: &str,
) -> anyhow::Result<DbConnectionConfig> {
    let max_connections = cfg.database.max_connections;
    if std::env::var_os(format!("{prefix}_DATABASE_URL")).is_some() {
        let pool = DbConnectionConfig::from_env(prefix)?;
        // `{prefix}_DB_MAX_CONNECTIONS` wins over `database.max_connections`.
        if std::env::var_os(format!("{prefix}_DB_MAX_CONNECTIONS")).is_some() {
            return Ok(pool);
        }
        return Ok(pool.with_max_connections(max_connections));
    }
    let url = cfg.database.connection_url()?;
    Ok(DbConnectionConfig::new(url).with_max_connections(max_connections))
}

/// Build the process-wide password hashing context.
pub fn password_context_from_config(
    cfg: &coursehub_config::PasswordConfig,
) -> anyhow::Result<PasswordContext> {
    let policy: DeprecatedPolicy = cfg.deprecated.parse()?;
    Ok(PasswordContext::new()
        .with_bcrypt_cost(cfg.bcrypt_cost)?
        .with_deprecated(policy))
}

/// Parse host:port into a SocketAddr, with fallback to 0.0.0.0.
pub fn parse_bind_address(host: &str, port: u16) -> SocketAddr {
    host.parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, port))
        .or_else(|_| host.parse::<SocketAddr>())
        .or_else(|_| {
            host.trim_matches(|c| c == '[' || c == ']')
                .parse::<Ipv6Addr>()
                .map(|ip| SocketAddr::new(IpAddr::V6(ip), port))
        })
        .unwrap_or_else(|_| {
            tracing::warn!(%host, "unparseable bind host, listening on 0.0.0.0");
            SocketAddr::from(([0, 0, 0, 0], port))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_variants() {
        assert_eq!(
            parse_bind_address("127.0.0.1", 8000),
            "127.0.0.1:8000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            parse_bind_address("[::1]", 9000),
            "[::1]:9000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            parse_bind_address("localhost", 8000),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn password_context_follows_config() {
        let cfg = coursehub_config::PasswordConfig {
            bcrypt_cost: 6,
            deprecated: "none".into(),
        };
        let ctx = password_context_from_config(&cfg).expect("context");
        assert_eq!(ctx.bcrypt_cost(), 6);
        assert_eq!(ctx.deprecated(), DeprecatedPolicy::None);
    }

    #[test]
    fn bad_password_settings_are_errors() {
        let cfg = coursehub_config::PasswordConfig {
            bcrypt_cost: 2,
            deprecated: "auto".into(),
        };
        assert!(password_context_from_config(&cfg).is_err());
    }

    #[test]
    fn sqlite_path_becomes_pool_url() {
        let mut cfg = coursehub_config::Config::default();
        cfg.database.path = Some("data/courses.db".into());
        cfg.database.max_connections = 3;
        let db = database_config_with_prefix(&cfg, "POOLTEST_FILE").expect("db config");
        assert_eq!(db.url, "sqlite://data/courses.db");
        assert_eq!(db.max_connections, 3);
    }

    #[test]
    fn env_url_keeps_configured_pool_size() {
        std::env::set_var("POOLTEST_URL_DATABASE_URL", "postgres://u:p@db/courses");
        let mut cfg = coursehub_config::Config::default();
        cfg.database.max_connections = 4;
        let db = database_config_with_prefix(&cfg, "POOLTEST_URL");
        std::env::remove_var("POOLTEST_URL_DATABASE_URL");

        let db = db.expect("db config");
        assert_eq!(db.url, "postgres://u:p@db/courses");
        assert_eq!(db.max_connections, 4);
    }

    #[test]
    fn env_pool_size_wins_over_config() {
        std::env::set_var("POOLTEST_MAX_DATABASE_URL", "postgres://u:p@db/courses");
        std::env::set_var("POOLTEST_MAX_DB_MAX_CONNECTIONS", "7");
        let mut cfg = coursehub_config::Config::default();
        cfg.database.max_connections = 4;
        let db = database_config_with_prefix(&cfg, "POOLTEST_MAX");
        std::env::remove_var("POOLTEST_MAX_DATABASE_URL");
        std::env::remove_var("POOLTEST_MAX_DB_MAX_CONNECTIONS");

        assert_eq!(db.expect("db config").max_connections, 7);
    }
}
