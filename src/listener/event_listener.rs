//! The subscriber socket and its poll loop.

use std::fmt;
use std::thread;
use std::time::Duration;

use super::dispatch;
use super::handler::{EventHandler, FnHandler};
use super::stop::{StopHandle, StopReason};
use crate::config::ListenerConfig;
use crate::domain::{Endpoint, Event, EventKind};
use crate::error::ListenerError;

/// Bounded wait per loop iteration, in milliseconds.
///
/// Upper bound on how long a stop request can go unnoticed.
pub const POLL_TIMEOUT_MS: i64 = 100;

/// Pause after a failed socket call so a broken socket does not spin.
const SOCKET_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Subscribes to an Event Broadcaster and routes its events.
///
/// The socket is connected at construction and closed when the listener
/// is dropped. [`EventListener::start`] blocks the calling thread until
/// [`EventListener::stop`], a [`StopHandle`] or an interrupt ends it.
///
/// # Example
///
/// ```no_run
/// use ephys_event_listener::EventListener;
///
/// let listener = EventListener::new("127.0.0.1", 5557)?;
/// listener.start(
///     |spike| println!("spike: {spike}"),
///     |ttl| println!("ttl: {ttl}"),
/// );
/// # Ok::<(), ephys_event_listener::ListenerError>(())
/// ```
pub struct EventListener {
    endpoint: Endpoint,
    socket: zmq::Socket,
    control: StopHandle,
}

impl EventListener {
    /// Connects to `tcp://<address>:<port>` and subscribes to all topics.
    ///
    /// Returns immediately whether or not a publisher is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::Socket`] if the socket cannot be created,
    /// connected or subscribed.
    pub fn new(address: &str, port: u16) -> Result<Self, ListenerError> {
        Self::connect(Endpoint::new(address, port))
    }

    /// Connects to the default broadcaster endpoint (`127.0.0.1:5557`).
    ///
    /// # Errors
    ///
    /// See [`EventListener::new`].
    pub fn with_defaults() -> Result<Self, ListenerError> {
        Self::from_config(&ListenerConfig::default())
    }

    /// Connects to the endpoint described by `config`.
    ///
    /// # Errors
    ///
    /// See [`EventListener::new`].
    pub fn from_config(config: &ListenerConfig) -> Result<Self, ListenerError> {
        Self::connect(config.endpoint())
    }

    /// Connects to `endpoint`.
    ///
    /// # Errors
    ///
    /// See [`EventListener::new`].
    pub fn connect(endpoint: Endpoint) -> Result<Self, ListenerError> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::SUB)?;
        socket.connect(&endpoint.url())?;
        socket.set_subscribe(b"")?;

        tracing::info!(endpoint = %endpoint, "initialized event listener");

        Ok(Self {
            endpoint,
            socket,
            control: StopHandle::new(),
        })
    }

    /// Returns the endpoint this listener is connected to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns `true` while the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Returns a handle that can stop the loop from another thread.
    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        self.control.clone()
    }

    /// Requests the loop to stop. Takes effect within one poll interval;
    /// calling it when not running has no effect.
    pub fn stop(&self) {
        self.control.stop();
    }

    /// Runs the loop with one callback per event kind.
    ///
    /// Blocks until stopped or interrupted. Malformed messages, handler
    /// panics and socket errors are logged and never end the loop.
    pub fn start<S, T>(&self, spike_callback: S, ttl_callback: T) -> StopReason
    where
        S: FnMut(Event),
        T: FnMut(Event),
    {
        self.run(&mut FnHandler::new(spike_callback, ttl_callback))
    }

    /// Runs the loop with an [`EventHandler`].
    ///
    /// Same contract as [`EventListener::start`]; errors returned by the
    /// handler are logged as well.
    pub fn run<H>(&self, handler: &mut H) -> StopReason
    where
        H: EventHandler + ?Sized,
    {
        tracing::info!(endpoint = %self.endpoint, "starting event listener");
        self.control.begin();

        while self.control.is_running() {
            match self.poll_once(handler) {
                Ok(Some(kind)) => tracing::trace!(kind = %kind, "dispatched event"),
                Ok(None) => {}
                Err(error) if error.is_signal_interruption() => {
                    tracing::trace!("socket wait interrupted by a signal, retrying");
                }
                Err(ListenerError::FrameCount(frames)) => {
                    tracing::trace!(frames, "ignoring message with unexpected frame count");
                }
                Err(error) if error.is_decode_error() => {
                    tracing::warn!(error = %error, "failed to decode event");
                }
                Err(error) => {
                    tracing::error!(error = %error, "event listener iteration failed");
                    if let Some(delay) = retry_delay(&error) {
                        thread::sleep(delay);
                    }
                }
            }
        }

        let reason = self.control.finish();
        if reason == StopReason::Interrupted {
            tracing::info!("event listener stopped by interrupt");
        }
        tracing::info!(endpoint = %self.endpoint, "event listener stopped");
        reason
    }

    /// Waits up to one poll interval and processes at most one message.
    fn poll_once<H>(&self, handler: &mut H) -> Result<Option<EventKind>, ListenerError>
    where
        H: EventHandler + ?Sized,
    {
        let mut items = [self.socket.as_poll_item(zmq::POLLIN)];
        if zmq::poll(&mut items, POLL_TIMEOUT_MS)? == 0 {
            return Ok(None);
        }

        let frames = self.socket.recv_multipart(0)?;
        let event = dispatch::route(frames)?;
        dispatch::dispatch(handler, event).map(Some)
    }
}

/// How long to wait before the next iteration after `error`.
fn retry_delay(error: &ListenerError) -> Option<Duration> {
    match error {
        ListenerError::Socket(_) if !error.is_signal_interruption() => Some(SOCKET_ERROR_BACKOFF),
        _ => None,
    }
}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("endpoint", &self.endpoint)
            .field("running", &self.control.is_running())
            .finish_non_exhaustive()
    }
}
