use crate::relay::RelayService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use tandem_core::{ClientEvent, PeerId};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(peer_id): Path<String>,
    State(service): State<RelayService>,
) -> Response {
    let peer_id = match peer_id.parse::<PeerId>() {
        Ok(peer_id) => peer_id,
        Err(e) => {
            warn!("Rejecting connection with invalid peer id '{}': {}", peer_id, e);
            return (StatusCode::BAD_REQUEST, "peer id must be a UUID").into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, service))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, service: RelayService) {
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(peer_id.clone(), tx.clone());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        match serde_json::from_str::<ClientEvent>(text.as_str()) {
                            Ok(event) => service.handle_event(&peer_id, event),
                            Err(e) => warn!("Invalid ClientEvent from {}: {:?}", peer_id, e),
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.remove_peer(&peer_id, &tx);
    info!("WebSocket disconnected: {}", peer_id);
}
