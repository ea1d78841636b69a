//! Signal controller: key → alias → debounce → transition → surface
//!
//! State transitions (every accepted activation, 200 ms global gate):
//! - NEUTRAL → RED / GREEN
//! - RED ↔ GREEN
//! - RED → RED, GREEN → GREEN: re-trigger, cue replays
//! - any → NEUTRAL: only through `reset_to_neutral`

use tokio::sync::mpsc::UnboundedSender;
use crate::NEUTRAL_PROMPT;
use crate::core::debounce::DebounceGate;
use crate::core::keymap::KeyMap;
use crate::core::surface::{AudioCue, DisplaySurface, PlaybackCompletion, PlaybackReport};
use crate::types::{CueChannel, InputOutcome, KeyDisposition, SignalState};

/// Owns the signal state and drives the presentation surface
#[derive(Debug)]
pub struct SignalController<D, A> {
    /// Current state
    state: SignalState,
    /// Debounce window, moved only by accepted activations
    gate: DebounceGate,
    /// Alias table, fixed after construction
    keymap: KeyMap,
    /// Visual output
    display: D,
    /// Red audio channel
    red_cue: A,
    /// Green audio channel
    green_cue: A,
    /// Where playback results go, if anyone listens
    reports: Option<UnboundedSender<PlaybackReport>>,
    /// Number of accepted activations
    accepted_count: u64,
}

impl<D: DisplaySurface, A: AudioCue> SignalController<D, A> {
    /// Create controller with the default key table and a 200 ms gate
    pub fn new(display: D, red_cue: A, green_cue: A) -> Self {
        Self {
            state: SignalState::Neutral,
            gate: DebounceGate::default(),
            keymap: KeyMap::default(),
            display,
            red_cue,
            green_cue,
            reports: None,
            accepted_count: 0,
        }
    }

    /// Replace the key table (configured key sets)
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replace the debounce gate
    pub fn with_gate(mut self, gate: DebounceGate) -> Self {
        self.gate = gate;
        self
    }

    /// Forward every playback result to `tx`
    pub fn with_playback_reports(mut self, tx: UnboundedSender<PlaybackReport>) -> Self {
        self.reports = Some(tx);
        self
    }

    /// Handle a key-down from the host.
    ///
    /// Default handling is suppressed for every mapped key, accepted or not.
    pub fn handle_key_down(&mut self, raw_key: &str, now_ms: u64) -> KeyDisposition {
        let default_prevented = self.keymap.suppresses(raw_key);
        let outcome = self.handle_input(raw_key, now_ms);
        KeyDisposition {
            default_prevented,
            outcome,
        }
    }

    /// Normalize, debounce and apply one raw key
    pub fn handle_input(&mut self, raw_key: &str, now_ms: u64) -> InputOutcome {
        let action = self.keymap.resolve(raw_key);
        let channel = match action.channel() {
            Some(channel) => channel,
            None => {
                log::trace!("ignoring key {:?}", raw_key);
                return InputOutcome::Ignored;
            }
        };

        if let Err(remaining_ms) = self.gate.check(now_ms) {
            let outcome = InputOutcome::debounced(remaining_ms);
            log::info!("{}", outcome.description());
            log::debug!("debounced {:?} at {}ms, {}ms left", raw_key, now_ms, remaining_ms);
            return outcome;
        }

        self.show(channel);
        self.gate.mark(now_ms);
        self.accepted_count += 1;

        InputOutcome::Accepted { channel }
    }

    /// Back to neutral with the instruction prompt. Debounce window untouched.
    pub fn reset_to_neutral(&mut self) {
        self.display.set_class(SignalState::Neutral.style_class());
        self.display.set_overlay_text(NEUTRAL_PROMPT);
        self.display.present();
        self.state = SignalState::Neutral;
        log::info!("Signal reset to neutral state");
    }

    /// Update visuals, then fire the cue. A cue failure never undoes the visuals.
    fn show(&mut self, channel: CueChannel) {
        let state = channel.state();
        self.display.set_class(state.style_class());
        self.display.set_overlay_text("");
        self.display.present();
        self.state = state;

        self.play_cue(channel);

        log::info!("{}", InputOutcome::Accepted { channel }.description());
    }

    fn play_cue(&mut self, channel: CueChannel) {
        let completion = PlaybackCompletion::new(channel, self.reports.clone());
        let cue = match channel {
            CueChannel::Red => &mut self.red_cue,
            CueChannel::Green => &mut self.green_cue,
        };

        cue.reset_position();
        if let Err(e) = cue.play(completion) {
            log::warn!("Error playing {} light sound: {}", channel, e);
            if let Some(tx) = &self.reports {
                let _ = tx.send(PlaybackReport {
                    channel,
                    result: Err(e.to_string()),
                });
            }
        }
    }

    /// Get current state
    pub fn state(&self) -> SignalState {
        self.state
    }

    /// Timestamp of the last accepted activation
    pub fn last_activation(&self) -> Option<u64> {
        self.gate.last_accept()
    }

    pub fn accepted_count(&self) -> u64 {
        self.accepted_count
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Get the cue behind a channel
    pub fn cue(&self, channel: CueChannel) -> &A {
        match channel {
            CueChannel::Red => &self.red_cue,
            CueChannel::Green => &self.green_cue,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
