/*!
Core Herald instance - owns the platform, the capability gate, the
notification defaults and event broadcasting.

# Module Structure

- `mod.rs` - Herald struct, builder, events
- `gate.rs` - one-way capability latch
- `resolver.rs` - provider handle cache (memoized on success)
- `emitter.rs` - the per-element emission sequence
- `config.rs` - notification defaults and failure policy

# Example

```ignore
let herald = Herald::builder()
    .default_kind(NotificationKind::ActionCompleted)
    .gate(CapabilityGate::process())
    .build(platform);

let element = herald.element(text_block);
element.create_peer();
element.request_notification("Response ready", "5A5CA7F5-5683-4021-9821-B581DA0B3F26");
```
*/

mod config;
mod emitter;
mod gate;
mod resolver;

pub use config::{FailurePolicy, NotifyConfig};
pub(crate) use emitter::Emitter;
pub use gate::CapabilityGate;

use async_broadcast::{InactiveReceiver, Receiver, Sender};
use std::fmt;
use std::sync::Arc;

use crate::a11y::{NotificationKind, NotificationProcessing};
use crate::element::NotificationElement;
use crate::platform::Platform;
use crate::types::Event;

const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Main Herald instance.
///
/// Clone is cheap (Arc bumps) - every element and emitter holds one.
pub struct Herald<P> {
  platform: Arc<P>,
  gate: CapabilityGate,
  config: NotifyConfig,
  events_tx: Sender<Event>,
  events_keepalive: InactiveReceiver<Event>,
}

impl<P> Clone for Herald<P> {
  fn clone(&self) -> Self {
    Self {
      platform: Arc::clone(&self.platform),
      gate: self.gate.clone(),
      config: self.config,
      events_tx: self.events_tx.clone(),
      events_keepalive: self.events_keepalive.clone(),
    }
  }
}

impl<P> fmt::Debug for Herald<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Herald")
      .field("available", &self.gate.is_available())
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

/// Builder for configuring a Herald instance.
///
/// # Example
///
/// ```ignore
/// let herald = Herald::builder()
///     .default_processing(NotificationProcessing::MostRecent)
///     .on_call_failure(FailurePolicy::Latch)
///     .build(platform);
/// ```
#[derive(Debug, Default, Clone)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct HeraldBuilder {
  config: NotifyConfig,
  gate: Option<CapabilityGate>,
}

impl HeraldBuilder {
  /// Replace the whole configuration.
  pub fn config(mut self, config: NotifyConfig) -> Self {
    self.config = config;
    self
  }

  /// Kind used by `request_notification`. Default: `ActionCompleted`.
  pub fn default_kind(mut self, kind: NotificationKind) -> Self {
    self.config.default_kind = kind;
    self
  }

  /// Processing used by `request_notification`. Default: `ImportantMostRecent`.
  pub fn default_processing(mut self, processing: NotificationProcessing) -> Self {
    self.config.default_processing = processing;
    self
  }

  /// How to treat failed calls when the primitive exists. Default: log and continue.
  pub fn on_call_failure(mut self, policy: FailurePolicy) -> Self {
    self.config.on_call_failure = policy;
    self
  }

  /// Share an existing gate instead of creating a fresh one.
  ///
  /// Pass [`CapabilityGate::process()`] to share the latch process-wide.
  pub fn gate(mut self, gate: CapabilityGate) -> Self {
    self.gate = Some(gate);
    self
  }

  /// Build the instance around `platform`.
  pub fn build<P>(self, platform: P) -> Herald<P> {
    self.build_shared(Arc::new(platform))
  }

  /// Build the instance around an already shared platform.
  pub fn build_shared<P>(self, platform: Arc<P>) -> Herald<P> {
    let (mut tx, rx) = async_broadcast::broadcast(EVENT_CHANNEL_CAPACITY);
    tx.set_overflow(true); // Drop oldest messages when full

    Herald {
      platform,
      gate: self.gate.unwrap_or_default(),
      config: self.config,
      events_tx: tx,
      events_keepalive: rx.deactivate(),
    }
  }
}

impl Herald<()> {
  /// Create a builder for configuring a new instance.
  ///
  /// The platform type is fixed by [`HeraldBuilder::build`].
  pub fn builder() -> HeraldBuilder {
    HeraldBuilder::default()
  }
}

impl<P> Herald<P> {
  /// Create an instance with default configuration and a fresh gate.
  pub fn new(platform: P) -> Self {
    HeraldBuilder::default().build(platform)
  }

  /// The platform this instance raises notifications through.
  pub fn platform(&self) -> &P {
    &self.platform
  }

  /// The capability gate shared by every element of this instance.
  pub const fn gate(&self) -> &CapabilityGate {
    &self.gate
  }

  /// Notification defaults and failure policy.
  pub const fn config(&self) -> &NotifyConfig {
    &self.config
  }

  /// Subscribe to notification events from this instance.
  pub fn subscribe(&self) -> Receiver<Event> {
    self.events_keepalive.activate_cloned()
  }

  pub(crate) fn emit_event(&self, event: Event) {
    if let Err(e) = self.events_tx.try_broadcast(event) {
      if e.is_full() {
        log::error!("Event channel overflow - notification events are being dropped");
      }
    }
  }
}

impl<P: Platform> Herald<P> {
  /// Wrap a visual element so it can request notifications.
  pub fn element(&self, visual: P::Element) -> NotificationElement<P>
  where
    P::Element: Sized,
  {
    NotificationElement::new(self.clone(), visual)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::memory::MemoryPlatform;

  #[test]
  fn builder_applies_configuration() {
    let herald = Herald::builder()
      .default_kind(NotificationKind::ItemAdded)
      .default_processing(NotificationProcessing::All)
      .on_call_failure(FailurePolicy::Latch)
      .build(MemoryPlatform::new());

    assert_eq!(herald.config().default_kind, NotificationKind::ItemAdded);
    assert_eq!(herald.config().default_processing, NotificationProcessing::All);
    assert_eq!(herald.config().on_call_failure, FailurePolicy::Latch);
  }

  #[test]
  fn injected_gate_is_shared() {
    let gate = CapabilityGate::new();
    let a = Herald::builder().gate(gate.clone()).build(MemoryPlatform::new());
    let b = Herald::builder().gate(gate.clone()).build(MemoryPlatform::new());

    a.gate().mark_unavailable();
    assert!(!b.gate().is_available());
    assert!(!gate.is_available());
  }

  #[test]
  fn separate_instances_get_separate_gates() {
    let a = Herald::new(MemoryPlatform::new());
    let b = Herald::new(MemoryPlatform::new());
    assert!(!a.gate().shares_state_with(b.gate()));
  }

  #[test]
  fn clones_share_platform_and_gate() {
    let herald = Herald::new(MemoryPlatform::new());
    let clone = herald.clone();
    assert!(Arc::ptr_eq(&herald.platform, &clone.platform));
    assert!(herald.gate().shares_state_with(clone.gate()));
  }

  #[test]
  fn events_without_subscribers_are_dropped_quietly() {
    let herald = Herald::new(MemoryPlatform::new());
    herald.emit_event(Event::CapabilityLost {
      reason: "test".into(),
    });
    let mut rx = herald.subscribe();
    assert!(rx.try_recv().is_err());
  }
}
