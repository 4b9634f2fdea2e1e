use crate::engine::TransportConfig;
use std::env;
use tandem_core::{IceServerConfig, RoomId};

pub const DEFAULT_RELAY_URL: &str = "ws://127.0.0.1:3000/ws";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base WebSocket URL; the peer id is appended as the last path segment.
    pub relay_url: String,
    pub room: RoomId,
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_owned(),
            room: RoomId::default(),
            transport: TransportConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `TANDEM_RELAY_URL`, `TANDEM_ROOM` and
    /// `TURN_URL` / `TURN_USERNAME` / `TURN_CREDENTIAL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("TANDEM_RELAY_URL") {
            config.relay_url = url;
        }
        if let Ok(room) = env::var("TANDEM_ROOM") {
            config.room = RoomId::new(room);
        }
        if let Ok(turn_url) = env::var("TURN_URL") {
            config.transport.ice_servers.push(IceServerConfig {
                urls: vec![turn_url],
                username: env::var("TURN_USERNAME").ok(),
                credential: env::var("TURN_CREDENTIAL").ok(),
            });
        }

        config
    }
}
