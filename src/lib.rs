//! # ephys-event-listener
//!
//! ZeroMQ subscriber for the Open Ephys Event Broadcaster.
//!
//! The listener connects a SUB socket to the broadcaster, decodes each
//! two-frame message as a JSON object, and hands it to a spike callback
//! when `event_type` is `"spike"` or to a TTL callback otherwise.
//!
//! ## Architecture
//!
//! ```text
//! Event Broadcaster (PUB, JSON)
//!     │
//!     └── EventListener (listener/)
//!             ├── poll loop, 100 ms wait, StopHandle
//!             ├── dispatch: frames → Event → handler
//!             └── EventHandler (spike / ttl callbacks)
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod listener;

pub use config::ListenerConfig;
pub use domain::{Endpoint, Event, EventKind};
pub use error::ListenerError;
pub use listener::{EventHandler, EventListener, StopHandle, StopReason};
