/*! What happened to a single notification request. */

use serde::Serialize;
use ts_rs::TS;

/// Why a request was dropped without reaching the platform primitive.
///
/// None of these are errors; they are the ordinary short-circuits of the
/// emission sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SkipReason {
  /// The element has no accessibility peer yet, so it owns no emitter.
  NoPeer,
  /// The capability latch was already flipped.
  CapabilityUnavailable,
  /// No accessibility client is listening.
  NoListeners,
  /// The peer lookup came back empty (element not realized in the tree yet).
  NotInAccessibilityTree,
}

/// Result of one emission attempt. Informational only: callers are free to
/// ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
  /// The primitive was invoked and reported success.
  Raised,
  /// Dropped before the primitive was invoked.
  Skipped(SkipReason),
  /// The primitive was invoked and failed; the gate was left alone.
  Failed,
  /// The primitive was invoked, failed, and the gate is now latched.
  CapabilityLost,
}

impl Outcome {
  /// Whether the platform primitive was invoked for this request.
  pub const fn reached_platform(&self) -> bool {
    !matches!(self, Self::Skipped(_))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_skips_stay_off_the_platform() {
    assert!(Outcome::Raised.reached_platform());
    assert!(Outcome::Failed.reached_platform());
    assert!(Outcome::CapabilityLost.reached_platform());
    assert!(!Outcome::Skipped(SkipReason::NoPeer).reached_platform());
    assert!(!Outcome::Skipped(SkipReason::NoListeners).reached_platform());
  }
}
