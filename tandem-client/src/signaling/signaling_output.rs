use crate::signaling::SignalingError;
use async_trait::async_trait;
use tandem_core::ClientEvent;

/// Outbound half of the relay connection.
///
/// The inbound half is an `mpsc::Receiver<RelayEvent>`; when it yields `None`
/// the relay is gone.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, event: ClientEvent) -> Result<(), SignalingError>;
}
