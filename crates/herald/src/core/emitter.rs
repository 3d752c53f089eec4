/*!
Notification emitter: the check-listener, resolve-handle, invoke,
handle-failure sequence.

Each step short-circuits the rest. Nothing here returns an error to the
caller; failures end up as gate updates, log lines and events.
*/

use parking_lot::Mutex;
use std::fmt;

use super::resolver::HandleCache;
use super::{FailurePolicy, Herald};
use crate::platform::{PeerLookup, Platform};
use crate::types::{Event, NotificationRequest, Outcome, PlatformError, SkipReason};

/// Raises notifications for one element. Owns that element's provider cache.
pub(crate) struct Emitter<P: Platform> {
  herald: Herald<P>,
  handle: Mutex<HandleCache<<P as PeerLookup>::Provider>>,
}

impl<P: Platform> fmt::Debug for Emitter<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Emitter")
      .field("resolved", &self.is_resolved())
      .finish_non_exhaustive()
  }
}

impl<P: Platform> Emitter<P> {
  /// Create an emitter with an empty provider cache.
  pub(crate) fn new(herald: Herald<P>) -> Self {
    Self {
      herald,
      handle: Mutex::new(HandleCache::NotResolved),
    }
  }

  /// Announce `request` on behalf of `element`. Best effort.
  pub(crate) fn emit(&self, request: &NotificationRequest, element: &P::Element) -> Outcome {
    if !self.herald.gate().is_available() {
      return self.skip(request, SkipReason::CapabilityUnavailable);
    }

    let platform = self.herald.platform();

    if !platform.clients_listening() {
      return self.skip(request, SkipReason::NoListeners);
    }

    // Guard is dropped before the platform call below.
    let Some(provider) = self.handle.lock().resolve(platform, element) else {
      return self.skip(request, SkipReason::NotInAccessibilityTree);
    };

    let result = platform.raise_notification(
      &provider,
      request.kind(),
      request.processing(),
      request.text(),
      request.correlation_id().as_str(),
    );

    match result {
      Ok(()) => {
        log::debug!(
          "Raised {:?} notification ({})",
          request.kind(),
          request.correlation_id()
        );
        self.herald.emit_event(Event::NotificationRaised {
          request: request.clone(),
        });
        Outcome::Raised
      }
      Err(PlatformError::CapabilityMissing { entry_point }) => {
        self.latch(format!("entry point not found: {entry_point}"));
        Outcome::CapabilityLost
      }
      Err(PlatformError::CallFailed { code, message }) => match self.herald.config().on_call_failure {
        FailurePolicy::LogAndContinue => {
          log::warn!("Notification call failed ({code:#x}): {message}");
          self.herald.emit_event(Event::NotificationFailed {
            request: request.clone(),
            code,
            message,
          });
          Outcome::Failed
        }
        FailurePolicy::Latch => {
          self.latch(format!("call failed ({code:#x}): {message}"));
          Outcome::CapabilityLost
        }
      },
    }
  }

  /// Whether a provider handle has been cached.
  pub(crate) fn is_resolved(&self) -> bool {
    self.handle.lock().is_resolved()
  }

  fn skip(&self, request: &NotificationRequest, reason: SkipReason) -> Outcome {
    log::trace!(
      "Skipped notification ({}): {reason:?}",
      request.correlation_id()
    );
    self.herald.emit_event(Event::NotificationSkipped {
      correlation_id: request.correlation_id().clone(),
      reason,
    });
    Outcome::Skipped(reason)
  }

  fn latch(&self, reason: String) {
    // Only the flipping call reports, so the transition is logged once per gate.
    if self.herald.gate().mark_unavailable() {
      log::warn!("Notifications disabled for this process: {reason}");
      self.herald.emit_event(Event::CapabilityLost { reason });
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::a11y::{NotificationKind, NotificationProcessing};
  use crate::platform::memory::{MemoryElement, MemoryPlatform};
  use crate::Herald;

  const GUID: &str = "5A5CA7F5-5683-4021-9821-B581DA0B3F26";

  fn request(text: &str) -> NotificationRequest {
    NotificationRequest::new(
      text,
      GUID,
      NotificationKind::ActionCompleted,
      NotificationProcessing::ImportantMostRecent,
    )
  }

  fn setup() -> (Herald<MemoryPlatform>, MemoryElement) {
    let herald = Herald::new(MemoryPlatform::new());
    let element = MemoryElement::new();
    herald.platform().realize(&element);
    (herald, element)
  }

  #[test]
  fn raises_once_with_request_fields() {
    let (herald, element) = setup();
    let emitter = Emitter::new(herald.clone());

    let outcome = emitter.emit(&request("This is the response to hello"), &element);

    assert_eq!(outcome, Outcome::Raised);
    let raised = herald.platform().raised();
    assert_eq!(raised.len(), 1);
    assert_eq!(raised[0].kind, NotificationKind::ActionCompleted);
    assert_eq!(raised[0].processing, NotificationProcessing::ImportantMostRecent);
    assert_eq!(raised[0].text, "This is the response to hello");
    assert_eq!(raised[0].correlation_id, GUID);
  }

  #[test]
  fn no_listeners_skips_before_resolution() {
    let (herald, element) = setup();
    herald.platform().set_listening(false);
    let emitter = Emitter::new(herald.clone());

    let outcome = emitter.emit(&request("hello"), &element);

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoListeners));
    let stats = herald.platform().stats();
    assert_eq!(stats.peer_lookups, 0);
    assert_eq!(stats.raise_attempts, 0);
    assert!(herald.gate().is_available());
    assert!(!emitter.is_resolved());
  }

  #[test]
  fn missing_peer_leaves_gate_and_cache_alone() {
    let herald = Herald::new(MemoryPlatform::new());
    let element = MemoryElement::new();
    let emitter = Emitter::new(herald.clone());

    let outcome = emitter.emit(&request("hello"), &element);

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NotInAccessibilityTree));
    assert!(herald.gate().is_available());
    assert!(!emitter.is_resolved());
    assert_eq!(herald.platform().stats().raise_attempts, 0);

    // Realized later: the next request resolves and raises.
    herald.platform().realize(&element);
    assert_eq!(emitter.emit(&request("hello"), &element), Outcome::Raised);
    assert!(emitter.is_resolved());
  }

  #[test]
  fn resolved_handle_is_reused() {
    let (herald, element) = setup();
    let emitter = Emitter::new(herald.clone());

    for _ in 0..5 {
      assert_eq!(emitter.emit(&request("hello"), &element), Outcome::Raised);
    }

    let stats = herald.platform().stats();
    assert_eq!(stats.peer_lookups, 1);
    assert_eq!(stats.provider_derivations, 1);
    let raised = herald.platform().raised();
    assert!(raised.iter().all(|r| r.provider == raised[0].provider));
  }

  #[test]
  fn missing_entry_point_latches_after_one_attempt() {
    let (herald, element) = setup();
    herald.platform().remove_entry_point();
    let emitter = Emitter::new(herald.clone());

    assert_eq!(emitter.emit(&request("hello"), &element), Outcome::CapabilityLost);
    assert!(!herald.gate().is_available());

    for _ in 0..100 {
      assert_eq!(
        emitter.emit(&request("hello"), &element),
        Outcome::Skipped(SkipReason::CapabilityUnavailable)
      );
    }

    assert_eq!(herald.platform().stats().raise_attempts, 1);
    assert!(!herald.gate().is_available());
  }

  #[test]
  fn latch_is_shared_by_emitters_of_one_gate() {
    let (herald, element) = setup();
    let other_element = MemoryElement::new();
    herald.platform().realize(&other_element);
    herald.platform().remove_entry_point();

    let first = Emitter::new(herald.clone());
    let second = Emitter::new(herald.clone());

    assert_eq!(first.emit(&request("a"), &element), Outcome::CapabilityLost);
    assert_eq!(
      second.emit(&request("b"), &other_element),
      Outcome::Skipped(SkipReason::CapabilityUnavailable)
    );
    assert_eq!(herald.platform().stats().raise_attempts, 1);
    assert_eq!(herald.platform().stats().listener_probes, 1);
  }

  #[test]
  fn call_failures_are_logged_and_retried_by_default() {
    let (herald, element) = setup();
    herald.platform().fail_with(Some(PlatformError::CallFailed {
      code: -1,
      message: "busy".into(),
    }));
    let emitter = Emitter::new(herald.clone());

    assert_eq!(emitter.emit(&request("a"), &element), Outcome::Failed);
    assert!(herald.gate().is_available());

    herald.platform().fail_with(None);
    assert_eq!(emitter.emit(&request("a"), &element), Outcome::Raised);
    assert_eq!(herald.platform().stats().raise_attempts, 2);
  }

  #[test]
  fn call_failures_latch_under_latch_policy() {
    let herald = Herald::builder()
      .on_call_failure(FailurePolicy::Latch)
      .build(MemoryPlatform::new());
    let element = MemoryElement::new();
    herald.platform().realize(&element);
    herald.platform().fail_with(Some(PlatformError::CallFailed {
      code: -1,
      message: "busy".into(),
    }));
    let emitter = Emitter::new(herald.clone());

    assert_eq!(emitter.emit(&request("a"), &element), Outcome::CapabilityLost);
    assert!(!herald.gate().is_available());
    assert_eq!(
      emitter.emit(&request("a"), &element),
      Outcome::Skipped(SkipReason::CapabilityUnavailable)
    );
    assert_eq!(herald.platform().stats().raise_attempts, 1);
  }

  #[test]
  fn events_follow_outcomes() {
    let (herald, element) = setup();
    let mut events = herald.subscribe();
    let emitter = Emitter::new(herald.clone());

    emitter.emit(&request("ready"), &element);
    herald.platform().remove_entry_point();
    emitter.emit(&request("ready"), &element);
    emitter.emit(&request("ready"), &element);

    assert!(matches!(
      events.try_recv().unwrap(),
      Event::NotificationRaised { .. }
    ));
    assert!(matches!(events.try_recv().unwrap(), Event::CapabilityLost { .. }));
    assert!(matches!(
      events.try_recv().unwrap(),
      Event::NotificationSkipped {
        reason: SkipReason::CapabilityUnavailable,
        ..
      }
    ));
    assert!(events.try_recv().is_err());
  }
}
