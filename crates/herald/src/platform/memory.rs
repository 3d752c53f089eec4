/*!
In-process platform backend.

Stands in for a real toolkit + accessibility stack: elements are realized
explicitly, listener presence and failures are scripted, and every call is
counted so callers can assert exactly what reached the "platform".
*/

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use super::traits::{NotificationApi, PeerLookup};
use crate::a11y::{NotificationKind, NotificationProcessing};
use crate::types::PlatformError;

/// Entry point name reported when a missing primitive is simulated.
pub const RAISE_ENTRY_POINT: &str = "RaiseNotificationEvent";

/// Global counter for `MemoryElement` ids. Starts at 1 (0 could be confused with "null").
static ELEMENT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A visual element known to the memory backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryElement(u64);

impl MemoryElement {
  /// Create a new element with a unique id.
  pub fn new() -> Self {
    Self(ELEMENT_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  /// Unique id of this element.
  pub const fn id(&self) -> u64 {
    self.0
  }
}

impl Default for MemoryElement {
  fn default() -> Self {
    Self::new()
  }
}

/// Accessibility peer of a realized element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPeer {
  element: u64,
}

/// Provider handle. `serial` identifies the derivation that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryProvider {
  /// Id of the element the provider targets.
  pub element: u64,
  /// Derivation counter; equal serials mean the same derivation.
  pub serial: u64,
}

/// A notification that reached the primitive and succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaisedNotification {
  /// Provider the notification targeted.
  pub provider: MemoryProvider,
  /// Kind passed to the primitive.
  pub kind: NotificationKind,
  /// Processing passed to the primitive.
  pub processing: NotificationProcessing,
  /// Announced text.
  pub text: String,
  /// Correlation id passed to the primitive.
  pub correlation_id: String,
}

/// Call counters, snapshotted by [`MemoryPlatform::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
  /// Calls to `clients_listening`.
  pub listener_probes: usize,
  /// Calls to `peer_for`.
  pub peer_lookups: usize,
  /// Calls to `provider_from`.
  pub provider_derivations: usize,
  /// Every invocation of the primitive, successful or not.
  pub raise_attempts: usize,
}

#[derive(Debug)]
struct MemoryState {
  listening: bool,
  realized: HashSet<u64>,
  failure: Option<PlatformError>,
  stats: CallStats,
  next_serial: u64,
  raised: Vec<RaisedNotification>,
}

/// Scriptable in-memory platform.
#[derive(Debug)]
pub struct MemoryPlatform {
  state: Mutex<MemoryState>,
}

impl Default for MemoryPlatform {
  fn default() -> Self {
    Self::new()
  }
}

impl MemoryPlatform {
  /// New backend: listeners present, no realized elements, no failures.
  pub fn new() -> Self {
    Self {
      state: Mutex::new(MemoryState {
        listening: true,
        realized: HashSet::new(),
        failure: None,
        stats: CallStats::default(),
        next_serial: 1,
        raised: Vec::new(),
      }),
    }
  }

  /// Toggle whether an accessibility client is listening.
  pub fn set_listening(&self, listening: bool) {
    self.state.lock().listening = listening;
  }

  /// Put an element into the accessibility tree so lookups find its peer.
  pub fn realize(&self, element: &MemoryElement) {
    self.state.lock().realized.insert(element.0);
  }

  /// Take an element out of the accessibility tree.
  pub fn unrealize(&self, element: &MemoryElement) {
    self.state.lock().realized.remove(&element.0);
  }

  /// Make every subsequent primitive call fail with `failure` (`None` restores success).
  pub fn fail_with(&self, failure: Option<PlatformError>) {
    self.state.lock().failure = failure;
  }

  /// Simulate a platform that lacks the notification primitive.
  pub fn remove_entry_point(&self) {
    self.fail_with(Some(PlatformError::missing(RAISE_ENTRY_POINT)));
  }

  /// Snapshot of the call counters.
  pub fn stats(&self) -> CallStats {
    self.state.lock().stats
  }

  /// Notifications that were successfully raised, oldest first.
  pub fn raised(&self) -> Vec<RaisedNotification> {
    self.state.lock().raised.clone()
  }
}

impl PeerLookup for MemoryPlatform {
  type Element = MemoryElement;
  type Peer = MemoryPeer;
  type Provider = MemoryProvider;

  fn peer_for(&self, element: &MemoryElement) -> Option<MemoryPeer> {
    let mut state = self.state.lock();
    state.stats.peer_lookups += 1;
    state
      .realized
      .contains(&element.0)
      .then_some(MemoryPeer { element: element.0 })
  }

  fn provider_from(&self, peer: &MemoryPeer) -> MemoryProvider {
    let mut state = self.state.lock();
    state.stats.provider_derivations += 1;
    let serial = state.next_serial;
    state.next_serial += 1;
    MemoryProvider {
      element: peer.element,
      serial,
    }
  }
}

impl NotificationApi<MemoryProvider> for MemoryPlatform {
  fn clients_listening(&self) -> bool {
    let mut state = self.state.lock();
    state.stats.listener_probes += 1;
    state.listening
  }

  fn raise_notification(
    &self,
    provider: &MemoryProvider,
    kind: NotificationKind,
    processing: NotificationProcessing,
    text: &str,
    correlation_id: &str,
  ) -> Result<(), PlatformError> {
    let mut state = self.state.lock();
    state.stats.raise_attempts += 1;
    if let Some(failure) = &state.failure {
      return Err(failure.clone());
    }
    state.raised.push(RaisedNotification {
      provider: *provider,
      kind,
      processing,
      text: text.to_owned(),
      correlation_id: correlation_id.to_owned(),
    });
    Ok(())
  }
}
