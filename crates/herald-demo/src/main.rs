//! Console rendition of the "response ready" sample.
//!
//! Each non-empty input line gets a response appended to the transcript and
//! announced through a notification element backed by the in-memory
//! platform. Events are echoed to stderr as JSON.
//!
//! Environment:
//! - `HERALD_NO_LISTENERS=1` - pretend no screen reader is running
//! - `HERALD_MISSING_ENTRY_POINT=1` - pretend the primitive is missing
//! - `RUST_LOG=herald=debug` - library logging

use std::io::{self, BufRead, Write};

use herald::platform::memory::{MemoryElement, MemoryPlatform};
use herald::{CapabilityGate, Herald};

/// Correlation id shared by every response announcement.
const RESPONSE_CORRELATION_ID: &str = "5A5CA7F5-5683-4021-9821-B581DA0B3F26";

fn env_flag(name: &str) -> bool {
  std::env::var(name).is_ok_and(|v| !v.is_empty() && v != "0")
}

/// Build the response for one input line, or `None` for blank input.
fn respond(input: &str) -> Option<String> {
  let input = input.trim();
  if input.is_empty() {
    return None;
  }
  Some(format!("This is the response to {input}"))
}

fn main() -> io::Result<()> {
  env_logger::init();

  let platform = MemoryPlatform::new();
  platform.set_listening(!env_flag("HERALD_NO_LISTENERS"));
  if env_flag("HERALD_MISSING_ENTRY_POINT") {
    platform.remove_entry_point();
  }

  let herald = Herald::builder()
    .gate(CapabilityGate::process())
    .build(platform);
  let mut events = herald.subscribe();

  let visual = MemoryElement::new();
  herald.platform().realize(&visual);
  let transcript = herald.element(visual);
  transcript.create_peer();

  let stdin = io::stdin();
  let mut stdout = io::stdout().lock();
  for line in stdin.lock().lines() {
    let Some(response) = respond(&line?) else {
      continue;
    };

    let outcome = transcript.request_notification(response.as_str(), RESPONSE_CORRELATION_ID);
    if outcome.reached_platform() {
      log::debug!("Announced: {outcome:?}");
    } else {
      log::debug!("Not announced: {outcome:?}");
    }

    writeln!(stdout, "{response}")?;
    stdout.flush()?;

    while let Ok(event) = events.try_recv() {
      match serde_json::to_string(&event) {
        Ok(json) => eprintln!("{json}"),
        Err(e) => log::error!("Failed to serialize event: {e}"),
      }
    }
  }

  Ok(())
}
