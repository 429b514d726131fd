//! Publisher endpoint the listener connects to.
//!
//! [`Endpoint`] pairs an address with a port and renders the ZeroMQ
//! connection string (`tcp://<address>:<port>`).

use std::fmt;

/// Address and port of an Event Broadcaster publisher.
///
/// Built once when the listener is constructed and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    address: String,
    port: u16,
}

impl Endpoint {
    /// Creates an endpoint from an address (host name or IP) and a port.
    #[must_use]
    pub fn new(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }

    /// Returns the address part.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the port part.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the ZeroMQ connection string, e.g. `tcp://127.0.0.1:5557`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("tcp://{}:{}", self.address, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tcp://{}:{}", self.address, self.port)
    }
}
