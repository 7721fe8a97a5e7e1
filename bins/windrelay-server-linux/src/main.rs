use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use windrelay_core::RelayConfig;
use windrelay_serial::{LineSink, PortSettings, SerialSink};
use windrelay_web::{serve, RelayState};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,windrelay_web=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env()?;
    let addr = config.listen_addr()?;

    // The listener must not start without the device.
    let sink = match SerialSink::open(&PortSettings::from(&config)) {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            tracing::error!("{}", e);
            return Ok(ExitCode::from(1));
        }
    };

    let state = Arc::new(RelayState::new(sink.clone()));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let result = serve(listener, state, shutdown_signal()).await;

    sink.close();
    tracing::info!("Serial port closed");

    result?;
    Ok(ExitCode::SUCCESS)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
