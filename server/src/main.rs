use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use daily_reports_server::{create_router, initialize_backend, logging, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!("Using data directory {}", config.data_directory.display());

    let app_state = initialize_backend(&config)?;
    let router = create_router(app_state, &config)?;

    let listener = TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}
