//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Audio cue failures. Never fatal to the controller.
#[derive(Debug, Error)]
pub enum CueError {
    #[error("audio resource not found: {0}")]
    MissingResource(PathBuf),

    #[error("failed to start player `{player}`: {source}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },

    #[error("player exited with {0}")]
    PlayerExit(std::process::ExitStatus),

    #[error("playback needs an async runtime, none is running")]
    NoRuntime,

    #[error("audio output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Invalid key set configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyMapError {
    #[error("empty key identifier")]
    EmptyKey,

    #[error("key `{0}` is bound to both red and green")]
    Conflict(String),
}

/// Malformed replay script
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("line {line}: expected `<at_ms> <key>`")]
    MissingKey { line: usize },

    #[error("line {line}: invalid timestamp `{value}`")]
    BadTimestamp { line: usize, value: String },

    #[error("line {line}: timestamp {at_ms} is earlier than the previous event ({previous})")]
    OutOfOrder { line: usize, at_ms: u64, previous: u64 },

    #[error("line {line}: unknown directive `@{name}`")]
    UnknownDirective { line: usize, name: String },
}

/// Keymap file loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    KeyMap(#[from] KeyMapError),
}
