//! Listener configuration loaded from environment variables.
//!
//! Only the publisher address and port are configurable. Values come from
//! the environment (or a `.env` file via `dotenvy`); anything missing or
//! unparseable falls back to the Event Broadcaster defaults.

use crate::domain::Endpoint;

/// Default publisher address (loopback).
pub const DEFAULT_ADDRESS: &str = "127.0.0.1";

/// Default Event Broadcaster port.
pub const DEFAULT_PORT: u16 = 5557;

/// Top-level listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Address of the machine running the broadcaster.
    pub address: String,

    /// Port the broadcaster publishes on.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ListenerConfig {
    /// Loads configuration from `EVENT_LISTENER_ADDRESS` and
    /// `EVENT_LISTENER_PORT`.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let address = lookup("EVENT_LISTENER_ADDRESS")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        let port = lookup("EVENT_LISTENER_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { address, port }
    }

    /// Returns the endpoint described by this configuration.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.address.clone(), self.port)
    }
}
