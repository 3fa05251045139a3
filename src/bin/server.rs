use adopet_server::{config::Config, migrator, routes};
use axum::routing::get;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), adopet_server::telemetry::TelemetryError> {
    let config = Config::from_env()?;

    adopet_server::telemetry::init_telemetry("adopet-server")?;

    let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();

    let db = Database::connect(&config.database_url).await?;

    if config.run_migrations {
        migrator::Migrator::up(&db, None).await?;
    }

    adopet_server::metrics::init_metrics(&db).await;

    let app = routes::app(Arc::new(db), &config)
        .layer(prometheus_layer)
        .route("/metrics", get(|| async move { metric_handle.render() }));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Servidor rodando na porta {}", config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down server"),
        Err(err) => tracing::error!("Unable to listen for shutdown signal: {}", err),
    }
}
