use crate::coordinator::{LinkState, Membership};
use tandem_core::{ChatMessage, RoomId};
use tokio::sync::oneshot;

/// User intents issued by the presentation layer.
#[derive(Debug)]
pub enum CallCommand {
    Join { room: RoomId, user: String },
    StartCall,
    StopCall,
    Leave,
    SendMessage { text: String },
    Snapshot(oneshot::Sender<CoordinatorSnapshot>),
}

impl CallCommand {
    /// Intents that abandon an in-flight negotiation step.
    pub fn is_teardown(&self) -> bool {
        matches!(self, CallCommand::StopCall | CallCommand::Leave)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorSnapshot {
    pub membership: Option<Membership>,
    pub link_state: LinkState,
    /// Most recent first.
    pub messages: Vec<ChatMessage>,
    pub pending_candidates: usize,
}
