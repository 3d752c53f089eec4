/*!
Capability gate: a one-way latch recording that the notification primitive
is known to be missing.

The gate starts available. `mark_unavailable` flips it permanently; there is
no way back. Clones share the same flag, so every emitter built from one gate
sees the flip immediately. A racing reader may still see `true` once, which
costs at most one extra failed call.
*/

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared one-way availability latch. Clone is cheap (Arc bump).
#[derive(Debug, Clone)]
pub struct CapabilityGate {
  available: Arc<AtomicBool>,
}

static PROCESS_GATE: OnceLock<CapabilityGate> = OnceLock::new();

impl CapabilityGate {
  /// A fresh, independent gate.
  pub fn new() -> Self {
    Self {
      available: Arc::new(AtomicBool::new(true)),
    }
  }

  /// The gate shared by the whole process.
  ///
  /// Use this when every notification-capable element should learn about a
  /// missing primitive at once, no matter which `Herald` created it.
  pub fn process() -> Self {
    PROCESS_GATE.get_or_init(Self::new).clone()
  }

  /// Whether the primitive has not (yet) been proven missing.
  pub fn is_available(&self) -> bool {
    self.available.load(Ordering::SeqCst)
  }

  /// Latch the gate. Idempotent.
  ///
  /// Returns `true` only for the call that performed the flip.
  pub fn mark_unavailable(&self) -> bool {
    self.available.swap(false, Ordering::SeqCst)
  }

  /// Whether two gates share the same flag.
  pub fn shares_state_with(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.available, &other.available)
  }
}

impl Default for CapabilityGate {
  fn default() -> Self {
    Self::new()
  }
}
