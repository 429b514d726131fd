//! Subscriber loop: socket ownership, polling, dispatch and shutdown.
//!
//! [`EventListener`] connects a ZeroMQ SUB socket to the broadcaster and
//! runs a blocking poll loop on the calling thread. Decoded events go to
//! an [`EventHandler`]; a [`StopHandle`] ends the loop from elsewhere.

pub mod dispatch;
pub mod event_listener;
pub mod handler;
pub mod stop;

pub use event_listener::{EventListener, POLL_TIMEOUT_MS};
pub use handler::{EventHandler, FnHandler, LogHandler};
pub use stop::{StopHandle, StopReason};
