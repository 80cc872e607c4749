//! CourseHub Backend Server
//!
//! Entry point for the coursehub-backend server with configuration loading,
//! database migrations, and HTTP server startup.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use coursehub_backend::state::AppState;

mod cli;
mod config_helpers;
mod tracing_setup;

use cli::CliArgs;
use config_helpers::{database_config_from_config, parse_bind_address, password_context_from_config};
use tracing_setup::install_tracing_from_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = coursehub_config::load_config(args.config_path.as_deref())
        .context("failed to load configuration")?;
    coursehub_config::validate_config(&config).context("invalid configuration")?;

    install_tracing_from_config(&config.logging);
    tracing::info!(
        config_path = args.config_path.as_deref().unwrap_or("-"),
        "configuration loaded"
    );

    // Create and migrate database
    let db_cfg = database_config_from_config(&config)?;
    let db_pool = coursehub_db::create_pool(&db_cfg)
        .await
        .context("failed to create database pool")?;
    run_migrations(&db_cfg, &db_pool).await?;

    tracing::info!(
        db_url = %coursehub_db::sanitize_database_url(&db_cfg.url),
        db_max_connections = %db_cfg.max_connections,
        "database configured"
    );

    let passwords = password_context_from_config(&config.password)?;
    tracing::info!(
        schemes = ?passwords.schemes(),
        bcrypt_cost = passwords.bcrypt_cost(),
        deprecated = ?passwords.deprecated(),
        "password hashing configured"
    );

    let state = Arc::new(AppState::new(db_pool, passwords));
    let app = coursehub_backend::build_router(state);

    let addr = parse_bind_address(&config.server.host, config.server.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Run the migrations matching the pool's driver.
async fn run_migrations(
    db_cfg: &coursehub_db::DbConnectionConfig,
    db_pool: &coursehub_db::DbPool,
) -> anyhow::Result<()> {
    let migrator = coursehub_migrations::migrator_for_url(&db_cfg.url);
    match migrator.run(db_pool).await {
        Ok(()) => {
            tracing::info!("database migrations applied successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!(%e, "failed to apply database migrations");
            Err(anyhow::anyhow!("failed to apply database migrations: {e}"))
        }
    }
}
