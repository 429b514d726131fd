//! Shared stop and interrupt flags.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Why [`super::EventListener::start`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `stop()` was called.
    Stopped,
    /// An interrupt was requested or the socket wait was interrupted.
    Interrupted,
}

/// Cloneable handle for stopping a running listener from another thread.
///
/// The loop reads the flags once per poll interval, so a request takes
/// effect within one poll timeout.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
    interrupted: Arc<AtomicBool>,
}

impl StopHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Requests a normal stop. Has no effect if the listener is not running.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Requests a stop caused by an interrupt (e.g. Ctrl-C).
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::Release);
        self.running.store(false, Ordering::Release);
    }

    /// Returns `true` while the loop is running and neither a stop nor an
    /// interrupt was requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && !self.interrupted.load(Ordering::Acquire)
    }

    /// Returns `true` if an interrupt is pending.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }

    /// Marks the loop as running. An interrupt requested before this call
    /// stays pending, so the loop ends without waiting on the socket.
    pub(crate) fn begin(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Marks the loop as stopped and reports why.
    pub(crate) fn finish(&self) -> StopReason {
        self.running.store(false, Ordering::Release);
        if self.interrupted.swap(false, Ordering::AcqRel) {
            StopReason::Interrupted
        } else {
            StopReason::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_running() {
        let handle = StopHandle::new();
        assert!(!handle.is_running());
        assert!(!handle.is_interrupted());
    }

    #[test]
    fn stop_clears_running_on_all_clones() {
        let handle = StopHandle::new();
        let clone = handle.clone();
        handle.begin();
        assert!(clone.is_running());
        clone.stop();
        assert!(!handle.is_running());
        assert_eq!(handle.finish(), StopReason::Stopped);
    }

    #[test]
    fn stop_is_idempotent() {
        let handle = StopHandle::new();
        handle.stop();
        handle.stop();
        assert!(!handle.is_running());
        assert_eq!(handle.finish(), StopReason::Stopped);
    }

    #[test]
    fn interrupt_reports_interrupted_once() {
        let handle = StopHandle::new();
        handle.begin();
        handle.interrupt();
        assert!(!handle.is_running());
        assert_eq!(handle.finish(), StopReason::Interrupted);
        assert_eq!(handle.finish(), StopReason::Stopped);
    }

    #[test]
    fn interrupt_before_begin_stays_pending() {
        let handle = StopHandle::new();
        handle.interrupt();
        handle.begin();
        assert!(!handle.is_running());
        assert!(handle.is_interrupted());
        assert_eq!(handle.finish(), StopReason::Interrupted);
    }

    #[test]
    fn finish_consumes_the_interrupt() {
        let handle = StopHandle::new();
        handle.interrupt();
        assert_eq!(handle.finish(), StopReason::Interrupted);
        handle.begin();
        assert!(handle.is_running());
    }
}
