use crate::config::RelayConfig;
use crate::relay::{JoinOutcome, RoomRegistry};
use axum::extract::ws::Message;
use dashmap::DashMap;
use std::sync::Arc;
use tandem_core::{ClientEvent, PeerId, RelayEvent, RoomId};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

struct RelayInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
    rooms: RoomRegistry,
}

/// Forwards signaling frames between the members of a room and broadcasts
/// chat to every connected peer.
#[derive(Clone)]
pub struct RelayService {
    inner: Arc<RelayInner>,
}

impl RelayService {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                peers: DashMap::new(),
                rooms: RoomRegistry::new(config.max_room_size),
            }),
        }
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        if self.inner.peers.insert(peer_id.clone(), tx).is_some() {
            warn!("Peer {} reconnected; replacing previous socket", peer_id);
        }
    }

    /// Drops the peer's socket and announces its departure in every room it
    /// was part of.
    ///
    /// Only the socket registered as `tx` is removed. A peer that already
    /// reconnected keeps its new socket and its rooms.
    pub fn remove_peer(&self, peer_id: &PeerId, tx: &mpsc::UnboundedSender<Message>) {
        let removed = self
            .inner
            .peers
            .remove_if(peer_id, |_, current| current.same_channel(tx));
        if removed.is_none() {
            debug!("Stale socket of {} closed; newer connection kept", peer_id);
            return;
        }

        for (room, remaining) in self.inner.rooms.leave_all(peer_id) {
            info!("Peer {} dropped out of room '{}'", peer_id, room);
            self.send_to_all(&remaining, &RelayEvent::UserLeft(peer_id.clone()));
        }
    }

    pub fn peer_count(&self) -> usize {
        self.inner.peers.len()
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.inner.rooms
    }

    pub fn handle_event(&self, peer_id: &PeerId, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom(room) => self.join(peer_id, room),
            ClientEvent::LeaveRoom(room) => self.leave(peer_id, room),
            ClientEvent::Offer { offer, room_id } => {
                self.forward(peer_id, &room_id, RelayEvent::Offer { offer })
            }
            ClientEvent::Answer { answer, room_id } => {
                self.forward(peer_id, &room_id, RelayEvent::Answer { answer })
            }
            ClientEvent::Candidate { candidate, room_id } => {
                self.forward(peer_id, &room_id, RelayEvent::Candidate { candidate })
            }
            ClientEvent::SendMessage(message) => {
                debug!("Chat message from {} ({})", message.user, peer_id);
                self.broadcast(&RelayEvent::ReceiveMessage(message));
            }
        }
    }

    fn join(&self, peer_id: &PeerId, room: RoomId) {
        match self.inner.rooms.join(&room, peer_id) {
            JoinOutcome::Joined { others } => {
                info!(
                    "Peer {} joined room '{}' ({} other member(s))",
                    peer_id,
                    room,
                    others.len()
                );
                self.send_to_all(&others, &RelayEvent::UserJoined(peer_id.clone()));
            }
            JoinOutcome::Full => {
                warn!("Room '{}' is full; refusing {}", room, peer_id);
                self.send_signal(peer_id, &RelayEvent::RoomFull { room_id: room });
            }
        }
    }

    fn leave(&self, peer_id: &PeerId, room: RoomId) {
        match self.inner.rooms.leave(&room, peer_id) {
            Some(remaining) => {
                info!("Peer {} left room '{}'", peer_id, room);
                self.send_to_all(&remaining, &RelayEvent::UserLeft(peer_id.clone()));
            }
            None => debug!("leaveRoom from {} for room '{}' ignored", peer_id, room),
        }
    }

    fn forward(&self, peer_id: &PeerId, room: &RoomId, event: RelayEvent) {
        let others = self.inner.rooms.others(room, peer_id);
        if others.is_empty() {
            debug!("Nothing to forward to in room '{}' for {}", room, peer_id);
            return;
        }
        self.send_to_all(&others, &event);
    }

    fn broadcast(&self, event: &RelayEvent) {
        let peers: Vec<PeerId> = self
            .inner
            .peers
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        self.send_to_all(&peers, event);
    }

    fn send_to_all(&self, peers: &[PeerId], event: &RelayEvent) {
        for peer_id in peers {
            self.send_signal(peer_id, event);
        }
    }

    pub fn send_signal(&self, peer_id: &PeerId, event: &RelayEvent) {
        if let Some(peer) = self.inner.peers.get(peer_id) {
            match serde_json::to_string(event) {
                Ok(json) => {
                    if let Err(e) = peer.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", peer_id, e);
                    }
                }
                Err(e) => error!("Failed to serialize relay event: {}", e),
            }
        } else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
        }
    }
}
