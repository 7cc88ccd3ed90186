//! lectern-api binary: configuration, startup, serving.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lectern_api::{app, AppState};
use lectern_core::defaults;
use lectern_db::Database;
use lectern_inference::{AnthropicBackend, DocumentAnalyzer};
use lectern_ingest::IngestionPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("LECTERN_DATABASE_URL")
        .unwrap_or_else(|_| defaults::DATABASE_URL.to_string());
    let uploads_dir =
        std::env::var("LECTERN_UPLOADS_DIR").unwrap_or_else(|_| defaults::UPLOADS_DIR.to_string());
    let host = std::env::var("LECTERN_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("LECTERN_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(defaults::SERVER_PORT);

    let db = Database::connect(&database_url).await?;
    db.migrate().await?;
    info!(database_url = %database_url, "Database ready");

    tokio::fs::create_dir_all(&uploads_dir).await?;

    let backend = Arc::new(AnthropicBackend::from_env());
    let analyzer = DocumentAnalyzer::new(backend);
    let pipeline = IngestionPipeline::new(db.clone(), analyzer.clone(), uploads_dir);

    let state = AppState {
        db,
        pipeline,
        analyzer,
    };
    let router = app(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
