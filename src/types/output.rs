//! Output structures for terminal display

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{InputOutcome, KeyDisposition, SignalState};

/// Output structure for each handled key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalOutput {
    /// Wall-clock timestamp
    pub timestamp: DateTime<Utc>,
    /// Session clock (milliseconds since start)
    pub at_ms: u64,
    /// Raw key as received
    pub key: String,
    /// State after handling
    pub state: SignalState,
    /// What happened
    pub outcome: InputOutcome,
    /// Host default handling suppressed?
    pub default_prevented: bool,
}

impl SignalOutput {
    /// Create new output
    pub fn new(key: &str, at_ms: u64, state: SignalState, disposition: KeyDisposition) -> Self {
        Self {
            timestamp: Utc::now(),
            at_ms,
            key: key.to_string(),
            state,
            outcome: disposition.outcome,
            default_prevented: disposition.default_prevented,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = SignalState::color_reset();
        let emoji = self.state.emoji();

        format!(
            "{}{} t={}ms | key={} | state={} | {}{}",
            color,
            emoji,
            self.at_ms,
            self.key,
            self.state,
            self.outcome.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let mut line = format!(
            "t={}ms | key={} | state={} | outcome={}",
            self.at_ms,
            self.key,
            self.state,
            self.outcome.code()
        );
        if let InputOutcome::Debounced { remaining_ms, .. } = self.outcome {
            line.push_str(&format!(" | remaining={}ms", remaining_ms));
        }
        line
    }
}
