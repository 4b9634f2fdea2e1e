mod relay_service;
mod room_registry;
mod ws_handler;

pub use relay_service::*;
pub use room_registry::*;
pub use ws_handler::*;

use crate::config::RelayConfig;
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Routes of the relay: `GET /ws/{peer_id}` upgrades to the signaling socket.
pub fn router(service: RelayService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws/{peer_id}", get(ws_handler))
        .layer(cors)
        .with_state(service)
}

/// Binds `config.addr` and serves until the listener fails.
pub async fn serve(config: RelayConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Relay listening on ws://{}/ws", listener.local_addr()?);

    let service = RelayService::new(&config);
    axum::serve(listener, router(service)).await?;
    Ok(())
}
