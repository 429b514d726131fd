//! Listener error types.
//!
//! [`ListenerError`] covers every way a single loop iteration can fail.
//! Only construction returns it to the caller; inside the loop each error
//! is logged and the loop continues. Only the stop flags end the loop.

use crate::domain::EventKind;

/// Errors produced by the listener.
///
/// # Loop policy
///
/// | Variant                                           | Logged at | Loop                  |
/// |---------------------------------------------------|-----------|-----------------------|
/// | `Socket(EINTR)`                                   | trace     | retries immediately   |
/// | `FrameCount`                                      | trace     | continues             |
/// | `InvalidUtf8`, `InvalidJson`, `NotAnObject`       | warn      | continues             |
/// | `Handler`, `HandlerPanicked`                      | error     | continues             |
/// | `Socket` (other)                                  | error     | continues after delay |
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// ZeroMQ socket creation, connect, poll or receive failed.
    #[error("socket error: {0}")]
    Socket(#[from] zmq::Error),

    /// The message did not consist of exactly two frames.
    #[error("expected 2 message frames, got {0}")]
    FrameCount(usize),

    /// The payload frame is not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The payload text is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("payload is a JSON {0}, expected an object")]
    NotAnObject(&'static str),

    /// A handler returned an error.
    #[error("{kind} handler failed: {error:#}")]
    Handler {
        /// Which handler failed.
        kind: EventKind,
        /// Error returned by the handler.
        error: anyhow::Error,
    },

    /// A handler panicked.
    #[error("{kind} handler panicked: {message}")]
    HandlerPanicked {
        /// Which handler panicked.
        kind: EventKind,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl ListenerError {
    /// Returns `true` if a signal cut the socket wait short (`EINTR`).
    ///
    /// Any signal with a handler can cause this, so it is not a request
    /// to stop.
    #[must_use]
    pub fn is_signal_interruption(&self) -> bool {
        matches!(self, Self::Socket(zmq::Error::EINTR))
    }

    /// Returns `true` for payload decoding failures.
    #[must_use]
    pub const fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUtf8(_) | Self::InvalidJson(_) | Self::NotAnObject(_)
        )
    }
}
