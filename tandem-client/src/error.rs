use crate::signaling::SignalingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallError {
    #[error("coordinator is no longer running")]
    CoordinatorStopped,

    #[error(transparent)]
    Signaling(#[from] SignalingError),
}
