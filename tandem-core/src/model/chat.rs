use serde::{Deserialize, Serialize};

/// A chat line. Rendering order is the relay's arrival order; `timestamp` is
/// only the sender's wall clock and is never used for sorting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub user: String,
    pub timestamp: String,
}
