//! Signal state definitions

use serde::{Deserialize, Serialize};

/// The three states of the signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalState {
    /// Initial state, nothing shown yet
    #[default]
    Neutral,
    /// Red light: everybody freezes
    Red,
    /// Green light: everybody moves
    Green,
}

impl SignalState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            SignalState::Neutral => "\x1b[90m", // Gray
            SignalState::Red => "\x1b[31m",     // Red
            SignalState::Green => "\x1b[32m",   // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            SignalState::Neutral => "⚪",
            SignalState::Red => "🔴",
            SignalState::Green => "🟢",
        }
    }

    /// Style id the display surface uses for this state
    pub fn style_class(&self) -> StyleClass {
        match self {
            SignalState::Neutral => StyleClass::Neutral,
            SignalState::Red => StyleClass::RedLight,
            SignalState::Green => StyleClass::GreenLight,
        }
    }
}

impl std::fmt::Display for SignalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignalState::Neutral => "NEUTRAL",
            SignalState::Red => "RED",
            SignalState::Green => "GREEN",
        };
        write!(f, "{}", name)
    }
}

/// Fixed set of visual classes a display surface understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleClass {
    Neutral,
    RedLight,
    GreenLight,
}

impl StyleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleClass::Neutral => "neutral",
            StyleClass::RedLight => "red-light",
            StyleClass::GreenLight => "green-light",
        }
    }
}

impl std::fmt::Display for StyleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
