//! Terminal presentation surface
//!
//! `TerminalDisplay` paints the signal as a colored banner, `BellCue` rings
//! the terminal bell, `SilentCue` backs `--mute`.

use colored::Colorize;
use std::io::{self, Write};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use crate::core::surface::{AudioCue, DisplaySurface, PlaybackCompletion};
use crate::types::{CueError, StyleClass};

/// Banner width in columns
const BANNER_WIDTH: usize = 44;

/// Display surface writing one banner per update
#[derive(Debug)]
pub struct TerminalDisplay<W: Write = io::Stdout> {
    out: W,
    class: StyleClass,
    overlay: String,
    color: bool,
    enabled: bool,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            class: StyleClass::Neutral,
            overlay: String::new(),
            color,
            enabled: true,
        }
    }

    /// Keep tracking updates but stop painting (JSON mode owns stdout)
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn class(&self) -> StyleClass {
        self.class
    }

    pub fn overlay(&self) -> &str {
        &self.overlay
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render the current surface
    pub fn render(&self) -> String {
        let label = match self.class {
            StyleClass::Neutral => "",
            StyleClass::RedLight => "RED LIGHT",
            StyleClass::GreenLight => "GREEN LIGHT",
        };
        let banner = format!("{:^width$}", label, width = BANNER_WIDTH);

        let banner = if !self.color {
            format!("[{}] {}", self.class, banner.trim())
        } else {
            match self.class {
                StyleClass::Neutral => banner.as_str().on_bright_black().to_string(),
                StyleClass::RedLight => banner.as_str().white().bold().on_red().to_string(),
                StyleClass::GreenLight => banner.as_str().black().bold().on_green().to_string(),
            }
        };

        if self.overlay.is_empty() {
            banner
        } else if self.color {
            format!("{}\n{}", banner, self.overlay.as_str().dimmed())
        } else {
            format!("{}\n{}", banner, self.overlay)
        }
    }
}

impl<W: Write> DisplaySurface for TerminalDisplay<W> {
    fn set_class(&mut self, class: StyleClass) {
        self.class = class;
    }

    fn set_overlay_text(&mut self, text: &str) {
        self.overlay = text.to_string();
    }

    fn present(&mut self) {
        if !self.enabled {
            return;
        }
        let frame = self.render();
        if let Err(e) = writeln!(self.out, "{}", frame).and_then(|_| self.out.flush()) {
            log::warn!("failed to paint signal: {}", e);
        }
    }
}

/// Stream the bell byte goes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BellStream {
    #[default]
    Stdout,
    /// Keeps stdout clean for machine-readable output
    Stderr,
}

/// Audio cue that rings the terminal bell
#[derive(Debug, Default)]
pub struct BellCue {
    plays: u64,
    stream: BellStream,
}

impl BellCue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring on stderr instead of stdout
    pub fn on_stderr() -> Self {
        Self {
            plays: 0,
            stream: BellStream::Stderr,
        }
    }

    pub fn plays(&self) -> u64 {
        self.plays
    }

    pub fn stream(&self) -> BellStream {
        self.stream
    }
}

async fn ring<W: AsyncWrite + Unpin>(mut out: W) -> io::Result<()> {
    out.write_all(b"\x07").await?;
    out.flush().await
}

impl AudioCue for BellCue {
    fn reset_position(&mut self) {
        // The bell has no position; every ring starts from the top.
    }

    fn play(&mut self, completion: PlaybackCompletion) -> Result<(), CueError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| CueError::NoRuntime)?;
        self.plays += 1;

        let stream = self.stream;
        handle.spawn(async move {
            let rung = match stream {
                BellStream::Stdout => ring(tokio::io::stdout()).await,
                BellStream::Stderr => ring(tokio::io::stderr()).await,
            };
            match rung {
                Ok(()) => completion.succeeded(),
                Err(e) => completion.failed(CueError::Output(e)),
            }
        });
        Ok(())
    }
}

/// Audio cue that plays nothing and always succeeds
#[derive(Debug, Default)]
pub struct SilentCue {
    plays: u64,
}

impl SilentCue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> u64 {
        self.plays
    }
}

impl AudioCue for SilentCue {
    fn reset_position(&mut self) {}

    fn play(&mut self, completion: PlaybackCompletion) -> Result<(), CueError> {
        self.plays += 1;
        completion.succeeded();
        Ok(())
    }
}
