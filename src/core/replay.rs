//! Replay scripts: timed key sequences for rehearsing a presentation
//!
//! One event per line:
//!   `<at_ms> <key>`       key press, e.g. `250 ArrowRight`
//!   `<at_ms> @visible`    visibility notification
//!   `<at_ms> @hidden`
//! Blank lines and `#` comments are skipped. Timestamps never go backwards.

use crate::core::events::HostEvent;
use crate::types::ReplayError;

/// Parse a whole script
pub fn parse_script(text: &str) -> Result<Vec<HostEvent>, ReplayError> {
    let mut events = Vec::new();
    let mut previous = 0u64;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let (stamp, rest) = match line.split_once(char::is_whitespace) {
            Some((stamp, rest)) if !rest.trim().is_empty() => (stamp, rest.trim()),
            _ => return Err(ReplayError::MissingKey { line: line_no }),
        };

        let at_ms: u64 = stamp.parse().map_err(|_| ReplayError::BadTimestamp {
            line: line_no,
            value: stamp.to_string(),
        })?;
        if at_ms < previous {
            return Err(ReplayError::OutOfOrder {
                line: line_no,
                at_ms,
                previous,
            });
        }
        previous = at_ms;

        let event = match rest.strip_prefix('@') {
            Some("visible") => HostEvent::Visibility { visible: true, at_ms },
            Some("hidden") => HostEvent::Visibility { visible: false, at_ms },
            Some(name) => {
                return Err(ReplayError::UnknownDirective {
                    line: line_no,
                    name: name.to_string(),
                })
            }
            None => HostEvent::key(rest, at_ms),
        };
        events.push(event);
    }

    Ok(events)
}
