use crate::signaling::{SignalingError, SignalingOutput};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tandem_core::{ClientEvent, PeerId, RelayEvent};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

const INBOUND_BUFFER: usize = 256;

/// Relay connection over a WebSocket.
///
/// Outbound frames go through an unbounded queue drained by a writer task;
/// inbound frames are decoded and pushed into the receiver returned by
/// [`WsSignaling::connect`] in arrival order.
#[derive(Clone)]
pub struct WsSignaling {
    tx: mpsc::UnboundedSender<Message>,
}

impl WsSignaling {
    /// Connects to `{relay_url}/{peer_id}`.
    pub async fn connect(
        relay_url: &str,
        peer_id: PeerId,
    ) -> Result<(Self, mpsc::Receiver<RelayEvent>), SignalingError> {
        let url = format!("{}/{}", relay_url.trim_end_matches('/'), peer_id);
        let (socket, _) = connect_async(url.as_str())
            .await
            .map_err(|e| SignalingError::Connect {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        info!("Connected to relay at {}", url);

        let (mut sender, mut receiver) = socket.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
        let (event_tx, event_rx) = mpsc::channel(INBOUND_BUFFER);

        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if sender.send(msg).await.is_err() {
                    break;
                }
            }
            let _ = sender.close().await;
        });

        tokio::spawn(async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        let event = match serde_json::from_str::<RelayEvent>(text.as_str()) {
                            Ok(event) => event,
                            Err(e) => {
                                warn!("Invalid relay frame: {:?}. Text: {}", e, text.as_str());
                                continue;
                            }
                        };
                        if event_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            debug!("Relay reader finished");
        });

        Ok((Self { tx }, event_rx))
    }
}

#[async_trait]
impl SignalingOutput for WsSignaling {
    async fn send(&self, event: ClientEvent) -> Result<(), SignalingError> {
        let json = serde_json::to_string(&event)?;
        self.tx
            .send(Message::text(json))
            .map_err(|_| SignalingError::Closed)
    }
}
