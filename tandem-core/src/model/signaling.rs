use crate::model::candidate::IceCandidate;
use crate::model::chat::ChatMessage;
use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use crate::model::session::SessionDescription;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// Frames a client sends to the relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    JoinRoom(RoomId),
    LeaveRoom(RoomId),
    Offer {
        offer: SessionDescription,
        room_id: RoomId,
    },
    Answer {
        answer: SessionDescription,
        room_id: RoomId,
    },
    Candidate {
        candidate: IceCandidate,
        room_id: RoomId,
    },
    /// Global, not scoped to a room.
    SendMessage(ChatMessage),
}

/// Frames the relay delivers to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum RelayEvent {
    UserJoined(PeerId),
    /// A member left the room or dropped its relay connection.
    UserLeft(PeerId),
    Offer { offer: SessionDescription },
    Answer { answer: SessionDescription },
    Candidate { candidate: IceCandidate },
    ReceiveMessage(ChatMessage),
    RoomFull { room_id: RoomId },
}
