use crate::engine::TrackKind;
use tandem_core::IceCandidate;

/// Remote media surfaced by the engine once the far side's tracks arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    pub track_id: String,
    pub stream_id: String,
    pub kind: TrackKind,
}

/// Events an engine raises on its own, outside of any awaited call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Locally gathered candidate that has to be relayed to the other side.
    LocalCandidate(IceCandidate),

    /// A remote track was attached to the link.
    RemoteTrack(RemoteTrack),
}
