use serde::Deserialize;
use std::time::Duration;

/// Game sessions configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Milliseconds to wait after the second player joins before announcing
    /// the start of the game, giving both players time to connect.
    #[serde(default = "default_start_announce_delay")]
    pub start_announce_delay: u64,
}

impl Config {
    pub fn start_announce_delay(&self) -> Duration {
        Duration::from_millis(self.start_announce_delay)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_announce_delay: default_start_announce_delay(),
        }
    }
}

fn default_start_announce_delay() -> u64 {
    800
}
