use crate::coordinator::LinkState;
use crate::engine::RemoteTrack;
use tandem_core::{ChatMessage, RoomId};

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CallEvent {
    LinkStateChanged(LinkState),
    LocalMediaReady { stream_id: String, tracks: usize },
    RemoteMediaAttached(RemoteTrack),
    RemoteMediaCleared,
    /// Full log, most recent first.
    MessagesUpdated(Vec<ChatMessage>),
    MediaUnavailable(String),
    RoomFull(RoomId),
    RelayDisconnected,
}
