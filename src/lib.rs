//! redlight: red light / green light signal for live presentations
//!
//! Keyboard input (including presenter-remote arrow/page keys) → KeyMap →
//! DebounceGate → SignalController → display surface + audio cues

pub mod core;
pub mod types;

// =============================================================================
// TIMING
// =============================================================================

/// Minimum interval between two accepted activations (milliseconds).
/// One gate shared by red and green.
pub const DEBOUNCE_INTERVAL_MS: u64 = 200;

// =============================================================================
// SURFACE TEXT
// =============================================================================

/// Overlay text shown while the signal is neutral
pub const NEUTRAL_PROMPT: &str = "Press R for Red Light or G for Green Light";

/// Startup help lines, logged once when the controller comes up
pub const STARTUP_HELP: [&str; 2] = [
    "Press R for Red Light, G for Green Light",
    "Or use presenter controls: Left/Down/PageDown for Red Light, Right/Up/PageUp for Green Light",
];

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
