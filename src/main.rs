use block_training::{i18n::load_language, router, AppState, Config, FileStore, ProgressRepository};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;

    let store = FileStore::new(&config.data_dir);
    let progress = ProgressRepository::load(store.clone()).await?;
    let language = load_language(&store).await?;
    info!(
        "loaded {} entries from {}",
        progress.all().len(),
        store.dir().display()
    );

    let app = router(AppState::new(store, progress, language));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
