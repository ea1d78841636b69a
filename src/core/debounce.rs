//! Debounce gate: one minimum interval shared by every activation

use crate::DEBOUNCE_INTERVAL_MS;

/// Gate state. Only accepted activations move the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceGate {
    interval_ms: u64,
    last_accept: Option<u64>,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEBOUNCE_INTERVAL_MS)
    }
}

impl DebounceGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accept: None,
        }
    }

    /// Check whether an input at `now_ms` may pass.
    ///
    /// Returns the milliseconds left in the window on rejection. Never
    /// mutates; call [`DebounceGate::mark`] once the input is accepted.
    pub fn check(&self, now_ms: u64) -> Result<(), u64> {
        match self.last_accept {
            None => Ok(()),
            Some(last) => {
                // A clock that steps backwards counts as zero elapsed.
                let elapsed = now_ms.saturating_sub(last);
                if elapsed < self.interval_ms {
                    Err(self.interval_ms - elapsed)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Record an accepted activation
    pub fn mark(&mut self, now_ms: u64) {
        self.last_accept = Some(now_ms);
    }

    pub fn last_accept(&self) -> Option<u64> {
        self.last_accept
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
