//! Runs the Taskhub HTTP service.
//!
//! Usage:
//!
//! ```text
//! taskhub [--bind-addr 0.0.0.0:8080] [--database-url postgres://...]
//! ```
//!
//! Every flag also reads an environment variable (see `--help`). Without a
//! database URL the service keeps tasks in memory for the lifetime of the
//! process. With one, the bundled schema is applied on startup and tasks are
//! stored in `PostgreSQL`.

use clap::Parser;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use eyre::WrapErr;
use mockable::DefaultClock;
use std::sync::Arc;
use taskhub::config::ServiceConfig;
use taskhub::task::{
    adapters::{
        http::{AppState, router},
        memory::InMemoryTaskRepository,
        postgres::{PostgresTaskRepository, TaskPgPool},
    },
    ports::TaskRepository,
    services::TaskManager,
};
use taskhub::telemetry;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServiceConfig::parse();
    config.validate().wrap_err("invalid configuration")?;
    telemetry::init(&config.log_level).wrap_err("initialise tracing")?;

    match config.database_url.clone() {
        Some(url) => {
            let pool = build_pool(url, config.db_pool_size).await?;
            let repository = PostgresTaskRepository::new(pool);
            repository
                .ensure_schema()
                .await
                .wrap_err("apply task schema")?;
            info!(pool_size = config.db_pool_size, "using PostgreSQL task store");
            serve(repository, &config).await
        }
        None => {
            warn!("DATABASE_URL not set; tasks are kept in memory only");
            serve(InMemoryTaskRepository::new(), &config).await
        }
    }
}

async fn build_pool(url: String, max_size: u32) -> eyre::Result<TaskPgPool> {
    tokio::task::spawn_blocking(move || {
        let manager = ConnectionManager::<PgConnection>::new(url);
        Pool::builder().max_size(max_size).build(manager)
    })
    .await
    .wrap_err("join pool builder")?
    .wrap_err("connect to PostgreSQL")
}

async fn serve<R>(repository: R, config: &ServiceConfig) -> eyre::Result<()>
where
    R: TaskRepository + 'static,
{
    let manager = TaskManager::new(Arc::new(repository), Arc::new(DefaultClock));
    let app = router(AppState::new(manager, config.listing_limits()));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .wrap_err_with(|| format!("bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "taskhub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("serve HTTP")?;
    info!("taskhub stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT"),
        () = terminate => info!("received SIGTERM"),
    }
}
