use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &jobforge::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        file_store_root = %cfg.file_store_root.display(),
        bind_addr = %cfg.bind_addr,
        loglevel = %cfg.loglevel,
    );

    let pool = jobforge::db::spawn(&cfg.database_url).await?;
    let files = jobforge::files::FileStore::local(&cfg.file_store_root)?;

    let state = jobforge::JobforgeState::new(pool, files, cfg.api_key.as_str(), cfg.max_upload_size);
    let app = jobforge::jobforge_router(state);

    let listener = TcpListener::bind(&cfg.bind_addr).await?;
    info!("HTTP server listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
