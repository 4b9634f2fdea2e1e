mod call_command;
mod call_event;
mod coordinator;
mod handle;
mod peer_link;

pub use call_command::*;
pub use call_event::*;
pub use coordinator::*;
pub use handle::*;
pub use peer_link::{LinkRole, LinkState, Membership};
