//! Presentation surface: what the controller drives
//!
//! A display (visual class + overlay text) and two audio cue channels.
//! Playback is fire-and-forget; the result comes back later through a
//! [`PlaybackCompletion`].

use tokio::sync::mpsc::UnboundedSender;
use crate::types::{CueChannel, CueError, StyleClass};

/// Visual half of the surface
pub trait DisplaySurface {
    fn set_class(&mut self, class: StyleClass);
    fn set_overlay_text(&mut self, text: &str);

    /// Called once after a batch of updates
    fn present(&mut self) {}
}

/// One audio channel
pub trait AudioCue {
    /// Rewind to the start. A cue still playing restarts on the next `play`.
    fn reset_position(&mut self);

    /// Start playback and return immediately.
    ///
    /// `Err` means playback could not even start. Otherwise the cue must
    /// eventually call exactly one branch of `completion`.
    fn play(&mut self, completion: PlaybackCompletion) -> Result<(), CueError>;
}

impl<T: AudioCue + ?Sized> AudioCue for Box<T> {
    fn reset_position(&mut self) {
        (**self).reset_position()
    }

    fn play(&mut self, completion: PlaybackCompletion) -> Result<(), CueError> {
        (**self).play(completion)
    }
}

/// Playback result, forwarded to whoever subscribed for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackReport {
    pub channel: CueChannel,
    pub result: Result<(), String>,
}

/// Two-branch continuation attached to a play request
#[derive(Debug)]
pub struct PlaybackCompletion {
    channel: CueChannel,
    reports: Option<UnboundedSender<PlaybackReport>>,
}

impl PlaybackCompletion {
    pub fn new(channel: CueChannel, reports: Option<UnboundedSender<PlaybackReport>>) -> Self {
        Self { channel, reports }
    }

    pub fn channel(&self) -> CueChannel {
        self.channel
    }

    /// Success branch
    pub fn succeeded(self) {
        log::info!("{} light sound played successfully", self.channel);
        self.report(Ok(()));
    }

    /// Failure branch
    pub fn failed(self, error: CueError) {
        log::warn!("Could not play {} light sound: {}", self.channel, error);
        log::warn!("This might be due to autoplay restrictions or a missing audio file");
        self.report(Err(error.to_string()));
    }

    fn report(self, result: Result<(), String>) {
        if let Some(tx) = self.reports {
            // Receiver gone means nobody is listening; diagnostics only.
            let _ = tx.send(PlaybackReport {
                channel: self.channel,
                result,
            });
        }
    }
}
