//! Shutdown state machine
//!
//! `Running -> Draining -> Stopped`. Each step happens at most once per
//! process and there is no way back; a restart needs a new process.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Longest the listener waits for in-flight requests once draining
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifecycle of the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShutdownState {
    /// Accepting and serving requests
    Running,
    /// No new connections; in-flight requests are finishing
    Draining,
    /// Serve loop has returned
    Stopped,
}

/// Shared handle over the listener's shutdown state
#[derive(Debug, Clone)]
pub struct ShutdownController {
    state: Arc<watch::Sender<ShutdownState>>,
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownController {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ShutdownState::Running);
        Self {
            state: Arc::new(state),
        }
    }

    /// Current state
    pub fn state(&self) -> ShutdownState {
        *self.state.borrow()
    }

    /// Start draining.
    ///
    /// Returns `true` only for the call that moved the state out of
    /// `Running`.
    pub fn trigger(&self) -> bool {
        self.state.send_if_modified(|state| {
            if *state == ShutdownState::Running {
                *state = ShutdownState::Draining;
                true
            } else {
                false
            }
        })
    }

    /// Record that the serve loop has finished draining
    pub fn mark_stopped(&self) -> bool {
        self.state.send_if_modified(|state| {
            if *state == ShutdownState::Draining {
                *state = ShutdownState::Stopped;
                true
            } else {
                false
            }
        })
    }

    /// Resolves once the state has left `Running`
    pub async fn draining(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|state| *state != ShutdownState::Running).await;
    }
}
