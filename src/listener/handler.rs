//! Callback seam between the socket loop and user code.

use std::fmt;

use crate::domain::Event;

/// Receives decoded events from the listener loop.
///
/// Exactly one of the two methods is called per decoded message. Both
/// default to doing nothing, so a handler only overrides the kinds it
/// cares about. An `Err` is logged by the loop and the next message is
/// processed as usual.
pub trait EventHandler {
    /// Called for events whose `event_type` is `"spike"`.
    ///
    /// # Errors
    ///
    /// Any error is logged by the listener; it never stops the loop.
    fn on_spike(&mut self, event: Event) -> anyhow::Result<()> {
        let _ = event;
        Ok(())
    }

    /// Called for every other event, including ones without `event_type`.
    ///
    /// # Errors
    ///
    /// Any error is logged by the listener; it never stops the loop.
    fn on_ttl(&mut self, event: Event) -> anyhow::Result<()> {
        let _ = event;
        Ok(())
    }
}

/// Adapts a pair of closures into an [`EventHandler`].
pub struct FnHandler<S, T> {
    spike: S,
    ttl: T,
}

impl<S, T> FnHandler<S, T>
where
    S: FnMut(Event),
    T: FnMut(Event),
{
    /// Wraps a spike callback and a TTL callback.
    pub const fn new(spike: S, ttl: T) -> Self {
        Self { spike, ttl }
    }
}

impl<S, T> EventHandler for FnHandler<S, T>
where
    S: FnMut(Event),
    T: FnMut(Event),
{
    fn on_spike(&mut self, event: Event) -> anyhow::Result<()> {
        (self.spike)(event);
        Ok(())
    }

    fn on_ttl(&mut self, event: Event) -> anyhow::Result<()> {
        (self.ttl)(event);
        Ok(())
    }
}

impl<S, T> fmt::Debug for FnHandler<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

/// Handler that writes every event to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

impl EventHandler for LogHandler {
    fn on_spike(&mut self, event: Event) -> anyhow::Result<()> {
        tracing::info!(event = %event, "spike event");
        Ok(())
    }

    fn on_ttl(&mut self, event: Event) -> anyhow::Result<()> {
        tracing::info!(event = %event, "ttl event");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: serde_json::Value) -> Event {
        let Ok(event) = Event::try_from(value) else {
            panic!("expected a JSON object");
        };
        event
    }

    #[test]
    fn fn_handler_routes_to_matching_closure() {
        let mut spikes = Vec::new();
        let mut ttls = Vec::new();
        {
            let mut handler = FnHandler::new(|e| spikes.push(e), |e| ttls.push(e));
            assert!(handler.on_spike(event(json!({"event_type": "spike"}))).is_ok());
            assert!(handler.on_ttl(event(json!({"channel": 1}))).is_ok());
            assert!(handler.on_ttl(event(json!({"channel": 2}))).is_ok());
        }
        assert_eq!(spikes.len(), 1);
        assert_eq!(ttls.len(), 2);
    }

    #[test]
    fn log_handler_accepts_both_kinds() {
        let mut handler = LogHandler;
        assert!(handler.on_spike(event(json!({"event_type": "spike"}))).is_ok());
        assert!(handler.on_ttl(event(json!({"event_type": "ttl"}))).is_ok());
    }
}
