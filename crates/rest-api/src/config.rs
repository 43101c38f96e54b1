use serde::Deserialize;
use std::{net::{Ipv4Addr, SocketAddr}, time::Duration};

/// Server configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Address on which to listen.
    #[serde(default = "default_address")]
    pub address: SocketAddr,
    /// Seconds of silence on a WebSocket after which the server pings
    /// the client.
    #[serde(default = "default_heartbeat")]
    pub heartbeat: u64,
}

impl Config {
    pub fn heartbeat(&self) -> Duration {
        Duration::from_secs(self.heartbeat)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: default_address(),
            heartbeat: default_heartbeat(),
        }
    }
}

/// Default address (0.0.0.0:8000).
fn default_address() -> SocketAddr {
    (Ipv4Addr::UNSPECIFIED, 8000).into()
}

fn default_heartbeat() -> u64 {
    30
}
