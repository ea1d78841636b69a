//! Core modules for redlight

pub mod keymap;
pub mod debounce;
pub mod surface;
pub mod controller;
pub mod terminal;
pub mod player;
pub mod events;
pub mod replay;
pub mod config;

pub use keymap::KeyMap;
pub use debounce::DebounceGate;
pub use surface::{AudioCue, DisplaySurface, PlaybackCompletion, PlaybackReport};
pub use controller::SignalController;
pub use terminal::{TerminalDisplay, BellCue, BellStream, SilentCue};
pub use player::{PlayerCue, default_player};
pub use events::{HostEvent, SessionClock, EventLoop, EventSender};
pub use replay::parse_script;
pub use config::KeySets;
