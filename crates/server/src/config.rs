//! Dev server configuration from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

pub const ADDR_ENV: &str = "MAICIVY_DEV_ADDR";
pub const HEARTBEAT_ENV: &str = "MAICIVY_DEV_HEARTBEAT_SECS";

const DEFAULT_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_HEARTBEAT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct DevServerConfig {
    pub addr: SocketAddr,
    /// Period between `heartbeat` frames on each analytics socket.
    pub heartbeat_interval: Duration,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(DEFAULT_ADDR),
            heartbeat_interval: DEFAULT_HEARTBEAT,
        }
    }
}

impl DevServerConfig {
    /// Read the config from the environment.
    ///
    /// Environment variables:
    /// - `MAICIVY_DEV_ADDR`: bind address (default: "0.0.0.0:8080")
    /// - `MAICIVY_DEV_HEARTBEAT_SECS`: heartbeat period in seconds (default: 5)
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let addr = match std::env::var(ADDR_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Ignoring {}={:?}: {}", ADDR_ENV, raw, e);
                defaults.addr
            }),
            Err(_) => defaults.addr,
        };

        let heartbeat_interval = match std::env::var(HEARTBEAT_ENV) {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!("Ignoring {}={:?}", HEARTBEAT_ENV, raw);
                    defaults.heartbeat_interval
                }
            },
            Err(_) => defaults.heartbeat_interval,
        };

        Self {
            addr,
            heartbeat_interval,
        }
    }

    pub fn with_heartbeat_interval(mut self, heartbeat_interval: Duration) -> Self {
        self.heartbeat_interval = heartbeat_interval;
        self
    }
}
