//! Test server harness.

use grader::embedding::MiniLmEmbedder;
use grader::extraction::PlainText;
use grader::gateway::{HandlerState, create_router_with_state};
use grader::scoring::SimilarityScorer;
use grader::storage::Database;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _temp_dir: TempDir,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

async fn wait_for_server_ready(addr: SocketAddr) -> Result<(), ServerStartupError> {
    let timeout = Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS);
    let interval = Duration::from_millis(STARTUP_POLL_INTERVAL_MS);
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => tokio::time::sleep(interval).await,
        }
    }
}

/// Spawns a server with an on-disk SQLite file, the stub embedder and a
/// plain-text document reader (uploads are UTF-8 text instead of PDFs).
pub async fn spawn_test_server() -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let temp_dir = TempDir::new()?;
    let database = Database::open(&temp_dir.path().join("results.db"))
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let embedder =
        MiniLmEmbedder::stub().map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let scorer = SimilarityScorer::new(Arc::new(embedder));

    let state = HandlerState::new(
        Arc::new(database),
        Arc::new(scorer),
        Arc::new(PlainText),
        Duration::from_secs(60),
        1024 * 1024,
    );

    let app = create_router_with_state(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(addr).await?;

    Ok(TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
        _temp_dir: temp_dir,
    })
}
