//! redlight CLI
//!
//! Usage:
//!   redlight                                 # Interactive: one key name per line
//!   redlight --replay talk.script            # Replay a timed key script
//!   redlight --replay talk.script --realtime # ...at the script's own pace
//!   redlight --red-sound red.wav --green-sound green.wav
//!   redlight --json                          # JSON line per key

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use redlight::core::{
    default_player, parse_script, AudioCue, BellCue, EventLoop, EventSender, HostEvent, KeyMap,
    KeySets, PlayerCue, SessionClock, SignalController, SilentCue, TerminalDisplay,
};
use redlight::types::{CueChannel, InputOutcome, KeyAction, SignalOutput, SignalState};
use redlight::{STARTUP_HELP, VERSION};

type HostCue = Box<dyn AudioCue + Send>;

#[derive(Parser, Debug)]
#[command(
    name = "redlight",
    version = VERSION,
    about = "Red light / green light signal for presentations",
    long_about = "redlight shows a red or green signal and plays a cue on each change.\n\n\
                  Keys:\n  \
                  R, Left, Down, PageDown   RED LIGHT\n  \
                  G, Right, Up, PageUp      GREEN LIGHT\n\n\
                  Changes closer together than 200 ms are ignored.\n\n\
                  Interactive mode reads one key name per line (e.g. `r`, `ArrowLeft`).\n\
                  `:visible` / `:hidden` simulate visibility changes, `quit` exits."
)]
struct Args {
    /// Replay a timed key script instead of reading stdin
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// With --replay, wait for each event's timestamp
    #[arg(long, requires = "replay")]
    realtime: bool,

    /// Audio file for the red cue (default: terminal bell)
    #[arg(long, value_name = "FILE")]
    red_sound: Option<PathBuf>,

    /// Audio file for the green cue (default: terminal bell)
    #[arg(long, value_name = "FILE")]
    green_sound: Option<PathBuf>,

    /// External player command for audio files
    #[arg(long, default_value_t = default_player().to_string())]
    player: String,

    /// No audio at all
    #[arg(long, conflicts_with_all = ["red_sound", "green_sound"])]
    mute: bool,

    /// Key that triggers red (repeatable, replaces the default red keys)
    #[arg(long = "red-key", value_name = "KEY")]
    red_keys: Vec<String>,

    /// Key that triggers green (repeatable, replaces the default green keys)
    #[arg(long = "green-key", value_name = "KEY")]
    green_keys: Vec<String>,

    /// TOML file with `red = [...]` and `green = [...]` key sets
    #[arg(long, value_name = "FILE")]
    keymap: Option<PathBuf>,

    /// Output one JSON object per key
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);
    if args.no_color {
        colored::control::set_override(false);
    }

    let keymap = build_keymap(&args)?;

    let mut display = TerminalDisplay::stdout(!args.no_color);
    if args.json {
        display = display.disabled();
    }

    let red = make_cue(CueChannel::Red, args.red_sound.as_deref(), &args);
    let green = make_cue(CueChannel::Green, args.green_sound.as_deref(), &args);

    let mut controller = SignalController::new(display, red, green).with_keymap(keymap);

    log::info!("redlight v{} initialized", VERSION);
    for line in STARTUP_HELP {
        log::info!("{}", line);
    }

    if !args.json {
        print_header(args.no_color);
    }
    controller.reset_to_neutral();

    let (mut event_loop, tx) = EventLoop::new(controller);

    let producer = match &args.replay {
        Some(path) => {
            let events = load_script(path)?;
            tokio::spawn(feed_replay(tx, events, args.realtime))
        }
        None => tokio::spawn(feed_stdin(tx)),
    };

    let handled = event_loop.run(|output| print_output(output, &args)).await;

    if let Err(e) = producer.await {
        log::error!("input task failed: {}", e);
    }

    // Let in-flight cues report before the runtime goes away
    tokio::time::sleep(Duration::from_millis(50)).await;

    let controller = event_loop.controller();
    log::info!(
        "Session ended. Events: {} | Accepted: {} | Final state: {}",
        handled,
        controller.accepted_count(),
        controller.state()
    );
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Key sets: defaults, then --keymap file, then --red-key/--green-key
fn build_keymap(args: &Args) -> Result<KeyMap> {
    let sets = match &args.keymap {
        Some(path) => KeySets::load(path)?,
        None => KeySets::default(),
    };
    let keymap = sets
        .merge(&args.red_keys, &args.green_keys)
        .build()
        .context("invalid key configuration")?;

    log::debug!(
        "red keys: {:?} | green keys: {:?}",
        keymap.keys_for(KeyAction::ActivateRed),
        keymap.keys_for(KeyAction::ActivateGreen)
    );
    Ok(keymap)
}

fn make_cue(channel: CueChannel, sound: Option<&Path>, args: &Args) -> HostCue {
    if args.mute {
        return Box::new(SilentCue::new());
    }
    let cue: HostCue = match sound {
        Some(path) => {
            if !path.is_file() {
                // Not fatal: the visual signal still works, every play will report it.
                log::warn!("{} sound {} not found", channel, path.display());
            }
            Box::new(PlayerCue::new(path, args.player.clone()))
        }
        // JSON mode owns stdout
        None if args.json => Box::new(BellCue::on_stderr()),
        None => Box::new(BellCue::new()),
    };
    cue
}

fn load_script(path: &Path) -> Result<Vec<HostEvent>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read replay script {}", path.display()))?;
    let events = parse_script(&text)
        .with_context(|| format!("invalid replay script {}", path.display()))?;
    log::debug!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Push script events onto the queue, optionally at their own pace
async fn feed_replay(tx: EventSender, events: Vec<HostEvent>, realtime: bool) {
    let start = tokio::time::Instant::now();
    for event in events {
        if realtime {
            tokio::time::sleep_until(start + Duration::from_millis(event.at_ms())).await;
        }
        if tx.send(event).is_err() {
            break;
        }
    }
}

/// Push stdin lines onto the queue, stamped with the session clock
async fn feed_stdin(tx: EventSender) {
    let clock = SessionClock::start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("failed to read stdin: {}", e);
                break;
            }
        };

        let key = line.trim();
        if key.eq_ignore_ascii_case("quit") || key.eq_ignore_ascii_case("exit") {
            break;
        }
        if key.is_empty() {
            continue;
        }

        let at_ms = clock.now_ms();
        let event = match key {
            ":visible" => HostEvent::Visibility { visible: true, at_ms },
            ":hidden" => HostEvent::Visibility { visible: false, at_ms },
            _ => HostEvent::key(key, at_ms),
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}

fn print_header(no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  redlight v{}", VERSION);
        println!("========================================");
    } else {
        println!("\x1b[1m╔════════════════════════════════════════╗\x1b[0m");
        println!("\x1b[1m║  🚦 redlight v{}                     ║\x1b[0m", VERSION);
        println!("\x1b[1m╚════════════════════════════════════════╝\x1b[0m");
    }
    println!();
}

fn print_output(output: &SignalOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("failed to encode output: {}", e),
        }
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    if let InputOutcome::Debounced { .. } = output.outcome {
        let (color, reset) = if args.no_color {
            ("", "")
        } else {
            ("\x1b[33m", SignalState::color_reset())
        };
        println!("{}  ⚠ {}{}", color, output.outcome.description(), reset);
    }
}
