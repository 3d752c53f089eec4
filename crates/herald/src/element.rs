/*!
Notification-capable element.

Wraps a visual element and owns its emitter. The emitter is created the
first time the toolkit builds the element's accessibility peer
([`NotificationElement::create_peer`]); until then requests are no-ops.
The emitter itself is not reachable from outside the element:

```compile_fail
use herald::Emitter;
```
*/

use std::fmt;
use std::sync::OnceLock;

use crate::a11y::{NotificationKind, NotificationProcessing};
use crate::core::{Emitter, Herald};
use crate::platform::Platform;
use crate::types::{CorrelationId, Event, NotificationRequest, Outcome, SkipReason};

/// A visual element that can announce notifications to assistive technology.
pub struct NotificationElement<P>
where
  P: Platform,
  P::Element: Sized,
{
  herald: Herald<P>,
  visual: P::Element,
  emitter: OnceLock<Emitter<P>>,
}

impl<P> fmt::Debug for NotificationElement<P>
where
  P: Platform,
  P::Element: Sized,
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NotificationElement")
      .field("has_peer", &self.has_peer())
      .finish_non_exhaustive()
  }
}

impl<P> NotificationElement<P>
where
  P: Platform,
  P::Element: Sized,
{
  pub(crate) fn new(herald: Herald<P>, visual: P::Element) -> Self {
    Self {
      herald,
      visual,
      emitter: OnceLock::new(),
    }
  }

  /// Hook for the toolkit: the element's accessibility peer was created.
  ///
  /// Creates the emitter on first call; later calls keep the existing one
  /// (and its cached provider).
  pub fn create_peer(&self) {
    self.emitter.get_or_init(|| Emitter::new(self.herald.clone()));
  }

  /// Whether the accessibility peer (and with it the emitter) exists.
  pub fn has_peer(&self) -> bool {
    self.emitter.get().is_some()
  }

  /// The wrapped visual element.
  pub const fn visual(&self) -> &P::Element {
    &self.visual
  }

  /// Read-only view of the capability gate.
  pub fn notification_available(&self) -> bool {
    self.herald.gate().is_available()
  }

  /// Announce `text` using the configured default kind and processing.
  ///
  /// Fire and forget: never fails, and the returned outcome can be ignored.
  pub fn request_notification(
    &self,
    text: impl Into<String>,
    correlation_id: impl Into<CorrelationId>,
  ) -> Outcome {
    let config = self.herald.config();
    self.request_notification_with(
      config.default_kind,
      config.default_processing,
      text,
      correlation_id,
    )
  }

  /// Announce `text` with an explicit kind and processing.
  pub fn request_notification_with(
    &self,
    kind: NotificationKind,
    processing: NotificationProcessing,
    text: impl Into<String>,
    correlation_id: impl Into<CorrelationId>,
  ) -> Outcome {
    let request = NotificationRequest::new(text, correlation_id, kind, processing);

    let Some(emitter) = self.emitter.get() else {
      log::trace!(
        "Skipped notification ({}): no accessibility peer",
        request.correlation_id()
      );
      self.herald.emit_event(Event::NotificationSkipped {
        correlation_id: request.correlation_id().clone(),
        reason: SkipReason::NoPeer,
      });
      return Outcome::Skipped(SkipReason::NoPeer);
    };

    emitter.emit(&request, &self.visual)
  }
}
