use crate::engine::{EngineEvent, LocalMedia, NegotiationEngine, RemoteTrack};
use std::fmt;
use std::sync::Arc;
use tandem_core::{PeerId, RoomId};
use tokio::sync::mpsc;

/// Lifecycle of the single peer link of a membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Absent,
    Negotiating,
    Connected,
    Closed,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkState::Absent => "absent",
            LinkState::Negotiating => "negotiating",
            LinkState::Connected => "connected",
            LinkState::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRole {
    /// Sent the offer because another member joined after us.
    Initiator,
    /// Answered an incoming offer.
    Responder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub room: RoomId,
    pub user: String,
}

pub(crate) struct PeerLink {
    pub engine: Arc<dyn NegotiationEngine>,
    pub events: mpsc::Receiver<EngineEvent>,
    pub media: LocalMedia,
    pub role: Option<LinkRole>,
    /// Known only on the initiator side; offers carry no sender.
    pub remote_peer: Option<PeerId>,
    pub awaiting_answer: bool,
    pub has_remote_description: bool,
    pub remote_tracks: Vec<RemoteTrack>,
}

impl PeerLink {
    pub fn new(
        engine: Arc<dyn NegotiationEngine>,
        events: mpsc::Receiver<EngineEvent>,
        media: LocalMedia,
    ) -> Self {
        Self {
            engine,
            events,
            media,
            role: None,
            remote_peer: None,
            awaiting_answer: false,
            has_remote_description: false,
            remote_tracks: Vec::new(),
        }
    }
}
