//! Answer-grader HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use grader::config::Config;
use grader::embedding::{EmbedderConfig, MiniLmEmbedder, TextEmbedder};
use grader::extraction::PdfTextExtractor;
use grader::gateway::{HandlerState, create_router_with_state};
use grader::scoring::SimilarityScorer;
use grader::storage::Database;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        database = %config.database_path.display(),
        "Grader starting"
    );

    let database = Arc::new(Database::open(&config.database_path)?);

    let embedder_config = if let Some(path) = &config.model_path {
        EmbedderConfig::new(path.clone())
    } else {
        tracing::warn!("No GRADER_MODEL_PATH configured, running embedder in stub mode");
        EmbedderConfig::stub()
    };
    let embedder = tokio::task::spawn_blocking(move || MiniLmEmbedder::load(embedder_config))
        .await??;
    tracing::info!(
        embedding_dim = embedder.embedding_dim(),
        stub = embedder.is_stub(),
        "Embedder ready"
    );

    let scorer = Arc::new(SimilarityScorer::new(Arc::new(embedder)));

    let state = HandlerState::new(
        database,
        scorer,
        Arc::new(PdfTextExtractor),
        config.session_ttl,
        config.max_upload_bytes,
    );

    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Grader shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("GRADER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
