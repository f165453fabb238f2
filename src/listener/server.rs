//! Listener server implementation
//!
//! Owns the bound socket, the router and the drain that follows a shutdown
//! request.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{Config, ConfigError};
use crate::resource::ResourceResolver;

use super::api::create_router;
use super::shutdown::{ShutdownController, DRAIN_TIMEOUT};

// ============================================================================
// App State
// ============================================================================

/// Context handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Configuration, read-only after start-up
    pub config: Arc<Config>,

    /// Resolver rooted at the static directory
    pub resolver: Arc<ResourceResolver>,

    /// Shutdown state machine
    pub shutdown: ShutdownController,

    /// Bound on the drain after shutdown is requested
    pub drain_timeout: Duration,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver = ResourceResolver::new(config.static_dir.clone());
        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            shutdown: ShutdownController::new(),
            drain_timeout: DRAIN_TIMEOUT,
        }
    }
}

// ============================================================================
// Resource Server
// ============================================================================

/// Static resource listener with an operator-triggered shutdown
pub struct ResourceServer {
    state: AppState,
}

impl ResourceServer {
    /// Create a new listener from a validated configuration
    pub fn new(config: Config) -> Result<Self, ServerError> {
        config.validate()?;
        Ok(Self {
            state: AppState::new(config),
        })
    }

    /// Override the drain bound
    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.state.drain_timeout = timeout;
        self
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Handle for triggering shutdown from outside HTTP
    pub fn shutdown_handle(&self) -> ShutdownController {
        self.state.shutdown.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Bind the configured port and serve until shutdown
    pub async fn run(&self) -> Result<(), ServerError> {
        let addr = self.state.config.bind_address()?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!(port = %self.state.config.port, "Server is listening");
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown.
    ///
    /// Once the controller leaves `Running` no new connections are accepted
    /// and in-flight requests get `drain_timeout` to finish. Missing that
    /// bound is logged as [`ServerError::ShutdownTimeout`] and the call
    /// still returns `Ok`; handlers still running are left to finish on
    /// their own.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServerError> {
        let controller = self.state.shutdown.clone();
        let signal = {
            let controller = controller.clone();
            async move { controller.draining().await }
        };

        let server = axum::serve(listener, self.build_router())
            .with_graceful_shutdown(signal)
            .into_future();
        tokio::pin!(server);

        tokio::select! {
            result = &mut server => {
                result.map_err(ServerError::Serve)?;
            }
            _ = controller.draining() => {
                let timeout_secs = self.state.drain_timeout.as_secs();
                tracing::info!(timeout_secs, "Draining in-flight requests");

                match tokio::time::timeout(self.state.drain_timeout, &mut server).await {
                    Ok(result) => result.map_err(ServerError::Serve)?,
                    Err(_) => {
                        let err = ServerError::ShutdownTimeout { timeout_secs };
                        tracing::error!(error = %err, "Exit failed");
                    }
                }
            }
        }

        controller.mark_stopped();
        tracing::info!("Server has shut down");
        Ok(())
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to bind to address
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Serve loop failed
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// In-flight requests outlived the drain bound
    #[error("Drain did not finish within {timeout_secs}s")]
    ShutdownTimeout { timeout_secs: u64 },
}

// ============================================================================
// Tests
// ============================================================================
