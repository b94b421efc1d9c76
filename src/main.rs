use skillswap::{app, AppState, Config, Dataset};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("skillswap=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let dataset = Dataset::load(config.seed_path.as_deref())?;
    let addr = config.addr;

    let app = app(AppState::new(dataset, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
