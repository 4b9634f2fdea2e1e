mod candidate;
mod chat;
mod peer;
mod room;
mod session;
mod signaling;

pub use candidate::IceCandidate;
pub use chat::ChatMessage;
pub use peer::PeerId;
pub use room::RoomId;
pub use session::{SdpKind, SessionDescription};
pub use signaling::{ClientEvent, IceServerConfig, RelayEvent};
