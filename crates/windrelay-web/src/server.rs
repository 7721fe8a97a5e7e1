//! Listener loop with graceful shutdown.

use std::future::Future;

use tokio::net::TcpListener;
use tracing::info;

use crate::{create_router, AppState};

/// Serve the relay on `listener` until `shutdown` resolves.
///
/// Once `shutdown` completes no new connections are accepted; requests
/// already in flight run to completion before this returns. The sink is
/// left open: the caller closes it after this returns.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP listener stopped");
    Ok(())
}
