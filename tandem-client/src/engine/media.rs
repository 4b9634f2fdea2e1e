use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use webrtc::track::track_local::TrackLocal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Audio => f.write_str("audio"),
            TrackKind::Video => f.write_str("video"),
        }
    }
}

/// One locally captured track. Stopping is final: a stopped track is never
/// restarted, a new acquisition produces new tracks.
pub trait MediaTrack: Send + Sync {
    fn id(&self) -> &str;

    fn kind(&self) -> TrackKind;

    fn stop(&self);

    fn is_stopped(&self) -> bool;

    /// RTP binding for engines built on `webrtc`.
    fn rtc_track(&self) -> Option<Arc<dyn TrackLocal + Send + Sync>> {
        None
    }
}

/// Audio/video stream handed out by a [`MediaSource`].
#[derive(Clone)]
pub struct LocalMedia {
    pub stream_id: String,
    pub tracks: Vec<Arc<dyn MediaTrack>>,
}

impl LocalMedia {
    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }

    pub fn all_stopped(&self) -> bool {
        self.tracks.iter().all(|t| t.is_stopped())
    }
}

impl fmt::Debug for LocalMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalMedia")
            .field("stream_id", &self.stream_id)
            .field("tracks", &self.tracks.len())
            .finish()
    }
}

/// Media acquisition primitive (camera + microphone).
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> Result<LocalMedia>;
}
