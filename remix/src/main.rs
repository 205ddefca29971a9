#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod vary;

use args::{Args, Command, ServeArgs};
use clap::Parser;
use remix_config::{API_KEY_ENV, Config};
use remix_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load_or_default(&args.config)?;

    // Initialize telemetry
    remix_telemetry::init(&config.telemetry)?;

    tracing::debug!(config_path = %args.config.display(), "configuration loaded");

    match args.command {
        Command::Serve(serve_args) => serve(config, serve_args).await,
        Command::Vary(vary_args) => vary::run(&config, vary_args).await,
    }
}

async fn serve(mut config: Config, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(listen) = args.listen {
        config.server.listen_address = Some(listen);
    }

    tracing::info!(listen_address = %config.server.listen_address(), "starting remix proxy");

    if !config.has_api_key() {
        tracing::info!(env = API_KEY_ENV, "no provider key in configuration, using the environment");
    }

    let server = Server::new(&config)?;

    // Set up graceful shutdown
    let shutdown = CancellationToken::new();
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_clone.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("remix proxy stopped");
    Ok(())
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
