//! Outcome codes for every handled key

use serde::{Deserialize, Serialize};
use crate::types::{CueChannel, SignalState};

/// What the controller did with one raw key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputOutcome {
    /// Transition applied, cue triggered
    Accepted {
        channel: CueChannel,
    },
    /// Inside the debounce window, nothing changed
    Debounced {
        /// Exact time left until the gate opens
        remaining_ms: u64,
        /// `remaining_ms / 1000` rounded up, as shown in the advisory
        wait_secs: u64,
    },
    /// Key not in the alias table
    Ignored,
}

impl InputOutcome {
    /// Build a debounce rejection from the time left in the window
    pub fn debounced(remaining_ms: u64) -> Self {
        InputOutcome::Debounced {
            remaining_ms,
            wait_secs: remaining_ms.div_ceil(1000),
        }
    }

    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Accepted { channel: CueChannel::Red } => "ACCEPTED_RED",
            Self::Accepted { channel: CueChannel::Green } => "ACCEPTED_GREEN",
            Self::Debounced { .. } => "DEBOUNCED",
            Self::Ignored => "IGNORED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> String {
        match self {
            Self::Accepted { channel: CueChannel::Red } => "Red Light activated!".to_string(),
            Self::Accepted { channel: CueChannel::Green } => "Green Light activated!".to_string(),
            // Label says seconds, value is the ceil of a sub-second remainder.
            Self::Debounced { wait_secs, .. } => format!(
                "Please wait {} more seconds before pressing again",
                wait_secs
            ),
            Self::Ignored => "Key not mapped".to_string(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// State an accepted input switched to
    pub fn accepted_state(&self) -> Option<SignalState> {
        match self {
            Self::Accepted { channel } => Some(channel.state()),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Controller answer to a key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDisposition {
    /// Host default handling (scrolling, slide navigation) must be suppressed
    pub default_prevented: bool,
    pub outcome: InputOutcome,
}
