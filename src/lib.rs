//! hearth - weekly heating schedules over HTTP
//!
//! Two halves share this crate. The listener serves schedule and
//! configuration files from a sandboxed directory and can be stopped over
//! HTTP with a bounded drain. The client turns time-of-day tokens into a
//! seven day minute-offset array and pushes or fetches it.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`schedule`] - Time tokens and weekly schedule encoding
//! - [`resource`] - Sandboxed file lookup, MIME types, conditional responses
//! - [`listener`] - HTTP server, handlers and shutdown state machine
//! - [`client`] - One-shot GET/POST client for schedules
//! - [`config`] - Listener configuration file
//! - [`error`] - Unified error type and classification
//!
//! # Example
//!
//! ```no_run
//! use hearth::config::Config;
//! use hearth::listener::ResourceServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("hearth", "listener.json")?;
//!     let server = ResourceServer::new(config)?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod listener;
pub mod resource;
pub mod schedule;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{ClientConfig, RequestMethod, ScheduleClient};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, HearthErrorTrait, Result};
    pub use crate::listener::{ResourceServer, ShutdownController, ShutdownState};
    pub use crate::resource::{Resource, ResourceResolver};
    pub use crate::schedule::{parse_time_token, TimeOfDay, WeeklySchedule};
}
