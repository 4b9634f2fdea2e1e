mod chat;
mod config;
mod coordinator;
mod engine;
mod error;
mod signaling;

pub use chat::*;
pub use config::*;
pub use coordinator::*;
pub use engine::*;
pub use error::*;
pub use signaling::*;
