use crate::engine::{EngineEvent, MediaTrack};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tandem_core::{IceCandidate, SessionDescription};
use tokio::sync::mpsc;

/// Offer/answer machinery of a single peer link.
///
/// Every call is fallible and may suspend. Implementations report locally
/// gathered candidates and remote tracks through the event sender they were
/// created with.
#[async_trait]
pub trait NegotiationEngine: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription>;

    async fn create_answer(&self) -> Result<SessionDescription>;

    async fn set_local_description(&self, desc: SessionDescription) -> Result<()>;

    async fn set_remote_description(&self, desc: SessionDescription) -> Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()>;

    async fn add_track(&self, track: Arc<dyn MediaTrack>, stream_id: &str) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

/// Builds one engine per peer link.
#[async_trait]
pub trait EngineFactory: Send + Sync {
    async fn create(&self, events: mpsc::Sender<EngineEvent>)
    -> Result<Arc<dyn NegotiationEngine>>;
}
