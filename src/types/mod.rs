//! Core types for redlight

mod state;
mod action;
mod outcome;
mod output;
mod error;

pub use state::{SignalState, StyleClass};
pub use action::{KeyAction, CueChannel};
pub use outcome::{InputOutcome, KeyDisposition};
pub use output::SignalOutput;
pub use error::{CueError, KeyMapError, ReplayError, ConfigError};
