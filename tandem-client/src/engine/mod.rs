mod engine_event;
mod media;
mod negotiation_engine;
mod rtc_engine;
mod sample_media;
mod transport_config;

pub use engine_event::*;
pub use media::*;
pub use negotiation_engine::*;
pub use rtc_engine::*;
pub use sample_media::*;
pub use transport_config::*;
