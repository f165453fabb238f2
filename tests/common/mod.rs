//! Common test utilities

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use hearth::config::Config;
use hearth::listener::{ResourceServer, ServerError, ShutdownController};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A listener running on an ephemeral local port
pub struct TestListener {
    pub addr: SocketAddr,
    pub shutdown: ShutdownController,
    pub handle: JoinHandle<Result<(), ServerError>>,
}

impl TestListener {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
    }
}

/// Create a static directory holding a weekly schedule and a settings file
pub fn create_static_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("schedule.txt"),
        "[420,1140,1860,2580,3300,4020,4740,5460,6180,6900,7620,8340,9060,9780]",
    )
    .unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"target":21}"#).unwrap();
    std::fs::create_dir(dir.path().join("zones")).unwrap();
    dir
}

/// Start a listener over `static_dir` on 127.0.0.1 with an ephemeral port
pub async fn spawn_listener(static_dir: &Path, shutdown_path: &str, drain: Duration) -> TestListener {
    let config = Config::builder()
        .app_name("hearth-test")
        .static_dir(static_dir)
        .shutdown_path(shutdown_path)
        .build()
        .unwrap();

    let server = ResourceServer::new(config).unwrap().with_drain_timeout(drain);
    let shutdown = server.shutdown_handle();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move { server.serve(listener).await });

    TestListener {
        addr,
        shutdown,
        handle,
    }
}
