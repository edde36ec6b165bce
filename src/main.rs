//! Book Loan Desk server

use std::net::SocketAddr;

use rand::{distributions::Alphanumeric, Rng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookloan_server::{api, config::AppConfig, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("bookloan_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Loan Desk v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.session_secret.is_empty() {
        tracing::warn!("No session secret configured; generated a random one, sessions will not survive a restart");
        config.auth.session_secret = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
    }

    // Create database connection pool and run migrations
    let pool = db::connect(&config.database).await?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState::new(pool, config);
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
