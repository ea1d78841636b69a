//! Host event queue
//!
//! All host input funnels through one unbounded channel with one consumer.
//! The `EventLoop` owns the controller and handles events one at a time, in
//! arrival order.

use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use crate::core::controller::SignalController;
use crate::core::surface::{AudioCue, DisplaySurface};
use crate::types::SignalOutput;

/// Input from the host environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A key went down
    KeyDown { key: String, at_ms: u64 },
    /// Page/terminal became visible or hidden. Diagnostic only.
    Visibility { visible: bool, at_ms: u64 },
}

impl HostEvent {
    pub fn key(key: impl Into<String>, at_ms: u64) -> Self {
        HostEvent::KeyDown {
            key: key.into(),
            at_ms,
        }
    }

    pub fn at_ms(&self) -> u64 {
        match self {
            HostEvent::KeyDown { at_ms, .. } | HostEvent::Visibility { at_ms, .. } => *at_ms,
        }
    }
}

/// Monotonic milliseconds since the session started
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    started: Instant,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::start()
    }
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Producer side of the queue
pub type EventSender = UnboundedSender<HostEvent>;

/// Single consumer of host events
#[derive(Debug)]
pub struct EventLoop<D, A> {
    controller: SignalController<D, A>,
    rx: UnboundedReceiver<HostEvent>,
    handled: u64,
}

impl<D: DisplaySurface, A: AudioCue> EventLoop<D, A> {
    /// Create loop and the sender that feeds it
    pub fn new(controller: SignalController<D, A>) -> (Self, EventSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_loop = Self {
            controller,
            rx,
            handled: 0,
        };
        (event_loop, tx)
    }

    /// Handle one event. Returns output for key events.
    pub fn dispatch(&mut self, event: HostEvent) -> Option<SignalOutput> {
        self.handled += 1;
        match event {
            HostEvent::KeyDown { key, at_ms } => {
                let disposition = self.controller.handle_key_down(&key, at_ms);
                Some(SignalOutput::new(
                    &key,
                    at_ms,
                    self.controller.state(),
                    disposition,
                ))
            }
            HostEvent::Visibility { visible, at_ms } => {
                if visible {
                    log::info!("Display is now visible - audio should work properly");
                } else {
                    log::debug!("Display hidden at {}ms", at_ms);
                }
                None
            }
        }
    }

    /// Drain the queue until every sender is dropped
    pub async fn run<F>(&mut self, mut sink: F) -> u64
    where
        F: FnMut(&SignalOutput),
    {
        while let Some(event) = self.rx.recv().await {
            if let Some(output) = self.dispatch(event) {
                sink(&output);
            }
        }
        log::debug!("event queue closed after {} events", self.handled);
        self.handled
    }

    /// Debug access to the controller
    pub fn controller(&self) -> &SignalController<D, A> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SignalController<D, A> {
        &mut self.controller
    }

    pub fn handled(&self) -> u64 {
        self.handled
    }

    pub fn into_controller(self) -> SignalController<D, A> {
        self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::terminal::{SilentCue, TerminalDisplay};
    use crate::types::{InputOutcome, SignalState};

    fn event_loop() -> (EventLoop<TerminalDisplay<Vec<u8>>, SilentCue>, EventSender) {
        let controller = SignalController::new(
            TerminalDisplay::new(Vec::new(), false),
            SilentCue::new(),
            SilentCue::new(),
        );
        EventLoop::new(controller)
    }

    #[test]
    fn test_dispatch_key() {
        let (mut el, _tx) = event_loop();
        let out = el.dispatch(HostEvent::key("g", 0)).unwrap();
        assert_eq!(out.state, SignalState::Green);
        assert!(out.default_prevented);
        assert_eq!(el.handled(), 1);
    }

    #[test]
    fn test_visibility_never_mutates() {
        let (mut el, _tx) = event_loop();
        el.dispatch(HostEvent::key("r", 0));
        assert!(el.dispatch(HostEvent::Visibility { visible: true, at_ms: 10 }).is_none());
        assert!(el.dispatch(HostEvent::Visibility { visible: false, at_ms: 20 }).is_none());
        assert_eq!(el.controller().state(), SignalState::Red);
        assert_eq!(el.controller().last_activation(), Some(0));
    }

    #[tokio::test]
    async fn test_run_preserves_order() {
        let (mut el, tx) = event_loop();
        for (key, at) in [("r", 0), ("g", 100), ("g", 250), ("ArrowDown", 260)] {
            tx.send(HostEvent::key(key, at)).unwrap();
        }
        drop(tx);

        let mut seen = Vec::new();
        let handled = el.run(|out| seen.push((out.at_ms, out.outcome.code()))).await;

        assert_eq!(handled, 4);
        assert_eq!(
            seen,
            vec![
                (0, "ACCEPTED_RED"),
                (100, "DEBOUNCED"),
                (250, "ACCEPTED_GREEN"),
                (260, "DEBOUNCED"),
            ]
        );
        assert_eq!(el.controller().state(), SignalState::Green);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = SessionClock::start();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_ignored_key_output() {
        let (mut el, _tx) = event_loop();
        let out = el.dispatch(HostEvent::key("Space", 0)).unwrap();
        assert_eq!(out.outcome, InputOutcome::Ignored);
        assert!(!out.default_prevented);
        assert_eq!(out.state, SignalState::Neutral);
    }
}
