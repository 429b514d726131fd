//! Domain layer: publisher endpoint and decoded events.
//!
//! These types carry no I/O. The socket loop in [`crate::listener`]
//! builds them from configuration and inbound frames.

pub mod endpoint;
pub mod event;

pub use endpoint::Endpoint;
pub use event::{Event, EventKind};
