//! Frame routing and fault-isolated handler invocation.
//!
//! Both functions are free of socket I/O so the loop's per-message
//! behavior can be exercised directly.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::EventHandler;
use crate::domain::{Event, EventKind};
use crate::error::ListenerError;

/// Turns one multipart message into an [`Event`].
///
/// The first frame is the topic and is ignored. The second frame is the
/// JSON payload.
///
/// # Errors
///
/// Returns [`ListenerError::FrameCount`] unless there are exactly two
/// frames, or a decode error from [`Event::decode`].
pub fn route(frames: Vec<Vec<u8>>) -> Result<Event, ListenerError> {
    let [_topic, payload]: [Vec<u8>; 2] = frames
        .try_into()
        .map_err(|frames: Vec<Vec<u8>>| ListenerError::FrameCount(frames.len()))?;
    Event::decode(&payload)
}

/// Hands `event` to the handler method matching its kind.
///
/// Handler errors and panics are captured so a misbehaving callback
/// cannot take the loop down.
///
/// # Errors
///
/// Returns [`ListenerError::Handler`] if the handler returned an error and
/// [`ListenerError::HandlerPanicked`] if it panicked.
pub fn dispatch<H>(handler: &mut H, event: Event) -> Result<EventKind, ListenerError>
where
    H: EventHandler + ?Sized,
{
    let kind = event.kind();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match kind {
        EventKind::Spike => handler.on_spike(event),
        EventKind::Ttl => handler.on_ttl(event),
    }));

    match outcome {
        Ok(Ok(())) => Ok(kind),
        Ok(Err(error)) => Err(ListenerError::Handler { kind, error }),
        Err(payload) => Err(ListenerError::HandlerPanicked {
            kind,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
