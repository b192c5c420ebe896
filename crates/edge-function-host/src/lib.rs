//! Edge Function Host
//!
//! Serves exactly one handler over HTTP the way a serverless platform would:
//! - Loads its settings from the environment
//! - Forwards every request, whatever the path or method, to the handler
//! - Turns handler failures, panics and timeouts into 5xx responses
//! - Shuts down gracefully on Ctrl+C / SIGTERM

pub mod config;
pub mod invoke;
pub mod router;
pub mod telemetry;

use anyhow::{Context, Result};
use edge_function_sdk::Handler;
use tokio::signal;

pub use config::HostConfig;
pub use invoke::{FunctionHost, InvokeError};
pub use router::{create_function_router, HostState};
pub use telemetry::init_tracing;

/// Serve `handler` until a shutdown signal arrives
pub async fn serve(config: HostConfig, handler: impl Handler) -> Result<()> {
    tracing::info!("Configuration loaded: {:?}", config);

    let addr = config.socket_addr()?;
    let state = HostState {
        host: FunctionHost::new(handler, config.handler_timeout()),
        max_body_bytes: config.max_body_bytes,
    };
    let app = create_function_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Function listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Function host stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
