//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, service wiring, admin
//! bootstrap, and the Axum server lifecycle.

use crate::application::services::{
    AdminService, AuthService, LinkService, QrService, RedirectService, StatsService,
};
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgClickRepository, PgLinkRepository, PgQrRepository, PgUserRepository,
};
use crate::infrastructure::reachability::HttpReachabilityChecker;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Repositories and services
/// - The admin account (created or token-rotated from config)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration run, admin
/// bootstrap, or server bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));
    let qr_repository = Arc::new(PgQrRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

    let reachability = Arc::new(HttpReachabilityChecker::new(
        config.reachability_timeout_secs,
    )?);

    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        config.token_signing_secret.clone(),
    ));
    auth_service
        .bootstrap_admin(&config.admin_username, &config.admin_email, &config.admin_token)
        .await?;

    let state = AppState {
        db: pool,
        link_service: Arc::new(LinkService::new(
            link_repository.clone(),
            reachability,
            config.base_url.clone(),
            config.short_code_length,
        )),
        redirect_service: Arc::new(RedirectService::new(
            link_repository.clone(),
            click_repository.clone(),
        )),
        qr_service: Arc::new(QrService::new(
            qr_repository,
            link_repository.clone(),
            config.base_url.clone(),
        )),
        stats_service: Arc::new(StatsService::new(
            link_repository.clone(),
            click_repository,
        )),
        auth_service,
        admin_service: Arc::new(AdminService::new(user_repository, link_repository)),
    };

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
