use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tandem_core::utils::MAX_ROOM_MEMBERS;

pub const DEFAULT_RELAY_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub addr: SocketAddr,
    /// A `joinRoom` beyond this many members is answered with `roomFull`.
    pub max_room_size: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_RELAY_ADDR,
            max_room_size: MAX_ROOM_MEMBERS,
        }
    }
}

impl RelayConfig {
    /// Defaults overridden by `TANDEM_ADDR`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = env::var("TANDEM_ADDR") {
            config.addr = addr
                .parse()
                .with_context(|| format!("Invalid TANDEM_ADDR '{}'", addr))?;
        }

        Ok(config)
    }
}
