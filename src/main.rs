use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth::error::HearthErrorTrait;

mod commands;

#[derive(Parser)]
#[command(
    name = "hearth",
    version,
    about = "Weekly heating schedule listener and client",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the static directory described by a JSON config file
    Listen {
        /// Path to the listener config file
        config: PathBuf,
    },

    /// Encode time tokens and POST, GET or save the weekly schedule
    ///
    /// Tokens: H, H:M or H.M times; host:<url>; get:<path>; post:<path>;
    /// file:<path>. Prefixes are case-insensitive.
    Send {
        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,

        /// Times and directives, in any order
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    setup_tracing(&cli.log_format, cli.verbose)?;

    let outcome = match cli.command {
        Commands::Listen { config } => {
            tracing::info!(config = %config.display(), "Starting listen command");
            commands::listen(&config).await
        }

        Commands::Send {
            timeout_secs,
            tokens,
        } => {
            tracing::debug!(
                timeout_secs = %timeout_secs,
                tokens = tokens.len(),
                "Starting send command"
            );
            commands::send(tokens, timeout_secs).await
        }
    };

    if let Err(e) = &outcome {
        tracing::error!(
            category = ?e.category(),
            recoverable = e.is_recoverable(),
            error = %e,
            "Command failed"
        );
    }

    outcome?;
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("hearth=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("hearth=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
