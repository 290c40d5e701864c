use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tatami_app::app::api::routes;
use tatami_app::schedule_handler::ScheduleServiceHandler;
use tatami_core::config::load_config;
use tatami_db::db::connection::create_pool;
use tatami_db::db::migrate::run_migrations;
use tatami_db::store::PgStore;
use tatami_service::schedule::ScheduleService;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Tatami availability scheduler");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let database_url = config.database.url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&database_url)).await??;

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let store = Arc::new(PgStore::new(pool));
    let service = Arc::new(ScheduleService::new(store.clone(), store));

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(ScheduleServiceHandler { service })
        .push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
