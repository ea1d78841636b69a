//! What a key means, and which cue it drives

use serde::{Deserialize, Serialize};
use crate::types::SignalState;

/// Result of resolving a raw key through the alias table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyAction {
    ActivateRed,
    ActivateGreen,
    Ignored,
}

impl KeyAction {
    /// Cue channel this action triggers, if any
    pub fn channel(&self) -> Option<CueChannel> {
        match self {
            KeyAction::ActivateRed => Some(CueChannel::Red),
            KeyAction::ActivateGreen => Some(CueChannel::Green),
            KeyAction::Ignored => None,
        }
    }
}

/// The two independent audio channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueChannel {
    Red,
    Green,
}

impl CueChannel {
    /// Signal state shown when this channel's cue fires
    pub fn state(&self) -> SignalState {
        match self {
            CueChannel::Red => SignalState::Red,
            CueChannel::Green => SignalState::Green,
        }
    }
}

impl std::fmt::Display for CueChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CueChannel::Red => f.write_str("red"),
            CueChannel::Green => f.write_str("green"),
        }
    }
}
