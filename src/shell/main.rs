use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use timesheets::modules::timesheets::adapters::outbound::postgres_timesheet_repository::PostgresTimesheetRepository;
use timesheets::modules::timesheets::application::service::TimesheetService;
use timesheets::shared::infrastructure::config::AppConfig;
use timesheets::shared::infrastructure::database;
use timesheets::shell::http::router;
use timesheets::shell::state::AppState;
use timesheets::shell::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config);

    let pool = database::connect(&config)
        .await
        .context("failed to connect to the database")?;
    database::migrate(&pool, &config)
        .await
        .context("failed to run migrations")?;

    let repository = Arc::new(PostgresTimesheetRepository::new(pool));
    let state = AppState {
        service: Arc::new(TimesheetService::new(repository)),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, environment = %config.environment, "timesheets listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("timesheets stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
