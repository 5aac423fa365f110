use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use yogabot_backend::config::AppConfig;
use yogabot_backend::routes;
use yogabot_backend::services::gemini::GeminiClient;
use yogabot_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("yogabot_backend=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    if !config.has_credential() {
        warn!("GEMINI_API_KEY not set; chat requests will fail until it is configured");
    }

    let model = Arc::new(GeminiClient::new(&config));
    let state = Arc::new(AppState::new(config.clone(), model));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router().with_state(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("yoga chatbot running at http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
