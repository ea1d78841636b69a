//! Integration tests for the signal controller
//!
//! Tests the full path: raw key → KeyMap → DebounceGate → SignalController → surface

use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

use redlight::core::{AudioCue, DisplaySurface, PlaybackCompletion, SignalController};
use redlight::types::{CueChannel, CueError, InputOutcome, SignalState, StyleClass};
use redlight::{DEBOUNCE_INTERVAL_MS, NEUTRAL_PROMPT};

/// Everything the surface saw, in order
type Journal = Rc<RefCell<Vec<String>>>;

struct RecordingDisplay {
    journal: Journal,
}

impl DisplaySurface for RecordingDisplay {
    fn set_class(&mut self, class: StyleClass) {
        self.journal.borrow_mut().push(format!("class:{}", class));
    }

    fn set_overlay_text(&mut self, text: &str) {
        self.journal.borrow_mut().push(format!("text:{}", text));
    }
}

struct RecordingCue {
    channel: &'static str,
    journal: Journal,
    fail: bool,
}

impl AudioCue for RecordingCue {
    fn reset_position(&mut self) {
        self.journal.borrow_mut().push(format!("{}:reset", self.channel));
    }

    fn play(&mut self, completion: PlaybackCompletion) -> Result<(), CueError> {
        self.journal.borrow_mut().push(format!("{}:play", self.channel));
        if self.fail {
            completion.failed(CueError::Output(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "autoplay blocked",
            )));
        } else {
            completion.succeeded();
        }
        Ok(())
    }
}

fn setup(fail_red: bool) -> (SignalController<RecordingDisplay, RecordingCue>, Journal) {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let controller = SignalController::new(
        RecordingDisplay { journal: journal.clone() },
        RecordingCue { channel: "red", journal: journal.clone(), fail: fail_red },
        RecordingCue { channel: "green", journal: journal.clone(), fail: false },
    );
    (controller, journal)
}

fn count(journal: &Journal, entry: &str) -> usize {
    journal.borrow().iter().filter(|e| *e == entry).count()
}

/// Unrecognized keys leave state and timestamp alone
#[test]
fn test_unrecognized_keys_change_nothing() {
    let (mut c, journal) = setup(false);
    for key in ["x", "Enter", "arrowleft", "PAGEDOWN", "rg", ""] {
        assert_eq!(c.handle_input(key, 1000), InputOutcome::Ignored);
    }
    assert_eq!(c.state(), SignalState::Neutral);
    assert_eq!(c.last_activation(), None);
    assert!(journal.borrow().is_empty());

    c.handle_input("r", 0);
    for key in ["q", "Home", "End"] {
        c.handle_input(key, 5000);
    }
    assert_eq!(c.state(), SignalState::Red);
    assert_eq!(c.last_activation(), Some(0));
}

/// Second activation inside the window is rejected, same color or not
#[test]
fn test_debounce_applies_to_both_colors() {
    for (first, second) in [("r", "r"), ("r", "g"), ("g", "r"), ("g", "g")] {
        let (mut c, _) = setup(false);
        let t1 = 10_000;
        assert!(c.handle_input(first, t1).is_accepted());
        let before = c.state();

        for delta in [0, 1, 100, DEBOUNCE_INTERVAL_MS - 1] {
            let outcome = c.handle_input(second, t1 + delta);
            assert_eq!(outcome, InputOutcome::debounced(DEBOUNCE_INTERVAL_MS - delta));
            assert_eq!(c.state(), before);
        }

        assert!(c.handle_input(second, t1 + DEBOUNCE_INTERVAL_MS).is_accepted());
    }
}

/// Red activation drives only the red cue, exactly once, after the visuals
#[test]
fn test_red_activation_side_effects() {
    let (mut c, journal) = setup(false);
    c.handle_input("ArrowDown", 0);

    assert_eq!(c.state(), SignalState::Red);
    assert_eq!(
        *journal.borrow(),
        vec!["class:red-light", "text:", "red:reset", "red:play"]
    );
    assert_eq!(count(&journal, "green:play"), 0);
}

/// Re-triggering the same color replays the cue
#[test]
fn test_retrigger_same_color() {
    let (mut c, journal) = setup(false);
    c.handle_input("g", 0);
    c.handle_input("PageUp", 200);
    c.handle_input("ArrowUp", 400);

    assert_eq!(c.state(), SignalState::Green);
    assert_eq!(count(&journal, "green:reset"), 3);
    assert_eq!(count(&journal, "green:play"), 3);
    assert_eq!(c.last_activation(), Some(400));
}

/// A fast burst never changes state and does not stretch the window
#[test]
fn test_burst_does_not_extend_window() {
    let (mut c, journal) = setup(false);
    c.handle_input("r", 1000);
    let plays_before = journal.borrow().len();

    for t in (1010..1200).step_by(10) {
        let key = if t % 20 == 0 { "g" } else { "ArrowRight" };
        assert!(!c.handle_input(key, t).is_accepted());
        assert_eq!(c.state(), SignalState::Red);
        assert_eq!(c.last_activation(), Some(1000));
    }
    assert_eq!(journal.borrow().len(), plays_before);

    // Measured from the accepted press, not from the last rejected one
    assert!(c.handle_input("g", 1200).is_accepted());
    assert_eq!(c.state(), SignalState::Green);
}

/// The reference scenario
#[test]
fn test_scenario() {
    let (mut c, _) = setup(false);

    assert_eq!(
        c.handle_input("r", 0),
        InputOutcome::Accepted { channel: CueChannel::Red }
    );
    assert_eq!(c.last_activation(), Some(0));

    assert_eq!(c.handle_input("g", 100), InputOutcome::debounced(100));
    assert_eq!(c.state(), SignalState::Red);

    assert_eq!(
        c.handle_input("g", 250),
        InputOutcome::Accepted { channel: CueChannel::Green }
    );
    assert_eq!(c.last_activation(), Some(250));

    assert_eq!(c.handle_input("ArrowDown", 260), InputOutcome::debounced(190));
    assert_eq!(c.state(), SignalState::Green);
    assert_eq!(c.accepted_count(), 2);
}

/// Audio failure is independent of the visual change
#[test]
fn test_audio_failure_keeps_visual_change() {
    let (mut c, journal) = setup(true);
    assert!(c.handle_input("r", 0).is_accepted());
    assert_eq!(c.state(), SignalState::Red);
    assert_eq!(journal.borrow()[0], "class:red-light");

    // Next activation tries again
    assert!(c.handle_input("r", 300).is_accepted());
    assert_eq!(count(&journal, "red:play"), 2);
}

/// Reset shows the prompt and leaves the gate where it was
#[test]
fn test_reset_to_neutral() {
    let (mut c, journal) = setup(false);
    c.handle_input("g", 0);
    c.reset_to_neutral();

    assert_eq!(c.state(), SignalState::Neutral);
    let journal = journal.borrow();
    assert_eq!(journal[journal.len() - 2], "class:neutral");
    assert_eq!(journal[journal.len() - 1], format!("text:{}", NEUTRAL_PROMPT));
    assert_eq!(c.last_activation(), Some(0));
}

/// Timestamps strictly increase across accepted activations
#[test]
fn test_accepted_timestamps_strictly_increase() {
    let (mut c, _) = setup(false);
    let mut accepted = Vec::new();
    for (i, key) in ["r", "g", "ArrowLeft", "PageUp", "R", "G"].iter().cycle().take(60).enumerate() {
        let t = (i as u64) * 70;
        if c.handle_input(key, t).is_accepted() {
            accepted.push(c.last_activation().unwrap());
        }
    }
    assert!(accepted.len() > 1);
    assert!(accepted.windows(2).all(|w| w[1] > w[0] && w[1] - w[0] >= DEBOUNCE_INTERVAL_MS));
}
