//! HTTP server loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use acct_config::Config;
use acct_store::{AccountService, AccountStore, FileStore};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::routes::account_routes;

/// Default graceful shutdown timeout.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration =
    Duration::from_secs(acct_core::DEFAULT_SHUTDOWN_TIMEOUT_SECS);

/// Run the server with a cancellation token for graceful shutdown.
pub async fn run_with_shutdown(
    config: Config,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let listen: SocketAddr = config
        .server
        .listen
        .parse()
        .map_err(|_| ServerError::Config("invalid listen address".into()))?;

    let store = FileStore::open(&config.storage.data_dir)?;
    info!(data_dir = %store.dir().display(), "account store ready");

    let listener = TcpListener::bind(listen).await?;
    serve(
        listener,
        AccountService::new(store),
        shutdown,
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await
}

/// Serve the account resource on an already bound listener until `shutdown`
/// is cancelled.
///
/// In-flight requests get `drain_timeout` to finish once shutdown starts.
pub async fn serve<S: AccountStore + 'static>(
    listener: TcpListener,
    service: AccountService<S>,
    shutdown: CancellationToken,
    drain_timeout: Duration,
) -> Result<(), ServerError> {
    let app = account_routes(Arc::new(service));
    info!(address = %listener.local_addr()?, "listening");

    let stop = shutdown.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { stop.cancelled_owned().await })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = async {
            shutdown.cancelled().await;
            tokio::time::sleep(drain_timeout).await;
        } => {
            warn!(timeout_secs = drain_timeout.as_secs(), "shutdown timeout, dropping open connections");
        }
    }

    info!("server stopped");
    Ok(())
}
