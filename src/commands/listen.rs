//! `hearth listen` - serve the static directory until shut down

use std::path::Path;

use hearth::config::Config;
use hearth::error::Result;
use hearth::listener::ResourceServer;

/// Load `config_path`, start the listener and block until it has drained
pub async fn listen(config_path: &Path) -> Result<()> {
    let executable = std::env::args().next().unwrap_or_default();
    let config = Config::load(&executable, config_path)?;

    tracing::info!(config = %config.to_json()?, "Configuration loaded");
    println!("{}", config.to_json()?);

    let server = ResourceServer::new(config)?;

    let controller = server.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                if controller.trigger() {
                    tracing::info!("Interrupt received, shutting down");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Unable to listen for interrupt"),
        }
    });

    server.run().await?;
    tracing::info!("Listener stopped");
    Ok(())
}
