//! `jobscope serve`: run the REST API until interrupted.

use crate::cli::output::{self, Styled};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::info;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Start the REST server and block until Ctrl-C.
pub async fn run(host: &str, port: Option<u16>, db: Option<PathBuf>) -> Result<()> {
    let config = crate::cli::load_config(db);
    let port = port.unwrap_or(config.http_port);
    info!("starting Jobscope v{}", env!("CARGO_PKG_VERSION"));
    let state = Arc::new(crate::state::SharedState::from_config(config)?);

    if !output::is_quiet() {
        eprintln!(
            "  {} Jobscope v{} serving on http://{host}:{port}",
            Styled::new().ok_sym(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let shutdown = Arc::new(Notify::new());
    let signal = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal.notify_one();
        }
    });

    crate::rest::start(host, port, state, shutdown).await
}
