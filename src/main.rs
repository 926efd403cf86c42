use tracing_subscriber::{fmt, EnvFilter};

use transactional::adapter::config::AppConfig;
use transactional::adapter::init::AppInitializer;
use transactional::adapter::web::create_router::create_router;
use transactional::error::ApplicationError;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::load()?;
    let listen = config.listen_addr()?;

    let state = AppInitializer::initialize(config).await?;
    let app = create_router(state);

    tracing::info!(%listen, "server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ApplicationError::ServerError(e.to_string()))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| ApplicationError::ServerError(e.to_string()))?;

    Ok(())
}
