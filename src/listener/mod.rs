//! Resource listener
//!
//! An HTTP front end over the static directory with an optional,
//! operator-configured shutdown route.
//!
//! # Endpoints
//!
//! ```text
//! ANY /<shutDownPath>   {"status":"shutting-down"}, then drain (only if configured)
//! ANY /<path>           file under staticDir, or {"error","status","type":"resource"}
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use hearth::config::Config;
//! use hearth::listener::ResourceServer;
//!
//! let config = Config::load("hearth", "listener.json")?;
//! let server = ResourceServer::new(config)?;
//! server.run().await?;
//! ```

pub mod api;
pub mod server;
pub mod shutdown;

// Re-export main types
pub use api::{create_router, ErrorEnvelope};
pub use server::{AppState, ResourceServer, ServerError};
pub use shutdown::{ShutdownController, ShutdownState, DRAIN_TIMEOUT};
