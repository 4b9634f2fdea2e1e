use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("failed to connect to relay at {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("relay connection closed")]
    Closed,

    #[error("failed to encode signal: {0}")]
    Encode(#[from] serde_json::Error),
}
