//! Health endpoint
//!
//! Exposes `GET /` returning a static liveness body. Runs as its own task
//! and never blocks the dispatcher.

use std::net::SocketAddr;

use axum::{routing::get, Router};
use tracing::{error, info};

use crate::utils::errors::Result;

async fn home() -> &'static str {
    "Bot is alive."
}

pub fn router() -> Router {
    Router::new().route("/", get(home))
}

/// Bind the health endpoint and serve it in a background task. Returns the
/// bound address (useful when binding to an ephemeral port).
pub async fn serve(bind_addr: &str) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let addr: SocketAddr = bind_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "Health endpoint listening");

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router()).await {
            error!(error = %e, "Health endpoint server failed");
        }
    });

    Ok((local_addr, handle))
}
