mod config;
mod relay;

pub use config::*;
pub use relay::*;
