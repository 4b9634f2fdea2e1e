use crate::engine::{LocalMedia, MediaSource, MediaTrack, TrackKind};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

const LOCAL_STREAM_ID: &str = "tandem-local";

/// Local track fed with already encoded samples.
pub struct SampleTrack {
    id: String,
    kind: TrackKind,
    track: Arc<TrackLocalStaticSample>,
    stopped: AtomicBool,
}

impl SampleTrack {
    fn new(kind: TrackKind, stream_id: &str) -> Self {
        let mime_type = match kind {
            TrackKind::Audio => MIME_TYPE_OPUS,
            TrackKind::Video => MIME_TYPE_VP8,
        };
        let id = kind.to_string();
        let track = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: mime_type.to_owned(),
                ..Default::default()
            },
            id.clone(),
            stream_id.to_owned(),
        ));

        Self {
            id,
            kind,
            track,
            stopped: AtomicBool::new(false),
        }
    }
}

impl MediaTrack for SampleTrack {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> TrackKind {
        self.kind
    }

    fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            debug!("Local {} track stopped", self.kind);
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    fn rtc_track(&self) -> Option<Arc<dyn TrackLocal + Send + Sync>> {
        Some(self.track.clone())
    }
}

/// Hands out one Opus audio and one VP8 video track per acquisition.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleMediaSource;

#[async_trait]
impl MediaSource for SampleMediaSource {
    async fn acquire(&self) -> Result<LocalMedia> {
        let tracks: Vec<Arc<dyn MediaTrack>> = vec![
            Arc::new(SampleTrack::new(TrackKind::Audio, LOCAL_STREAM_ID)),
            Arc::new(SampleTrack::new(TrackKind::Video, LOCAL_STREAM_ID)),
        ];

        Ok(LocalMedia {
            stream_id: LOCAL_STREAM_ID.to_owned(),
            tracks,
        })
    }
}
