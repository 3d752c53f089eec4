/*!
Platform abstraction traits.

These traits define the contract between core code and platform bindings.
The toolkit side ([`PeerLookup`]) knows how to find an element's
accessibility peer and derive a provider handle from it; the native side
([`NotificationApi`]) knows how to probe for listeners and raise the
notification. Core code only uses these traits, never binding types.
*/

use crate::a11y::{NotificationKind, NotificationProcessing};
use crate::types::PlatformError;

/// Toolkit-side lookups: visual element -> accessibility peer -> provider.
pub trait PeerLookup {
  /// Visual element type the toolkit hands out.
  type Element: ?Sized;
  /// Accessibility peer type. Only lives long enough to derive a provider.
  type Peer;
  /// Opaque provider handle passed to the notification call.
  /// Clone should be cheap (reference counted).
  type Provider: Clone;

  /// Find the accessibility peer for an element.
  ///
  /// `None` means the element is not realized in the accessibility tree yet.
  /// That is a transient condition, not a failure.
  fn peer_for(&self, element: &Self::Element) -> Option<Self::Peer>;

  /// Derive the provider handle from a peer.
  fn provider_from(&self, peer: &Self::Peer) -> Self::Provider;
}

/// Native notification primitives, generic over the provider handle type.
pub trait NotificationApi<H> {
  /// Whether any accessibility client is currently listening for events.
  fn clients_listening(&self) -> bool;

  /// Raise a notification targeted at `provider`.
  ///
  /// Bindings must report a missing primitive as
  /// [`PlatformError::CapabilityMissing`], never as `CallFailed`.
  fn raise_notification(
    &self,
    provider: &H,
    kind: NotificationKind,
    processing: NotificationProcessing,
    text: &str,
    correlation_id: &str,
  ) -> Result<(), PlatformError>;
}

/// Everything the emitter needs: lookups plus primitives over the same
/// provider type. Implemented automatically.
pub trait Platform: PeerLookup + NotificationApi<<Self as PeerLookup>::Provider> {}

impl<T> Platform for T where T: PeerLookup + NotificationApi<<T as PeerLookup>::Provider> {}

/// Pairs a toolkit lookup with a native notification API.
///
/// ```ignore
/// let platform = Composed::new(MyToolkitLookup::new(), UiaCore::new());
/// let herald = Herald::new(platform);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Composed<L, N> {
  lookup: L,
  api: N,
}

impl<L, N> Composed<L, N> {
  /// Combine a lookup and an API.
  pub const fn new(lookup: L, api: N) -> Self {
    Self { lookup, api }
  }

  /// The toolkit-side lookup.
  pub const fn lookup(&self) -> &L {
    &self.lookup
  }

  /// The native notification API.
  pub const fn api(&self) -> &N {
    &self.api
  }
}

impl<L: PeerLookup, N> PeerLookup for Composed<L, N> {
  type Element = L::Element;
  type Peer = L::Peer;
  type Provider = L::Provider;

  fn peer_for(&self, element: &Self::Element) -> Option<Self::Peer> {
    self.lookup.peer_for(element)
  }

  fn provider_from(&self, peer: &Self::Peer) -> Self::Provider {
    self.lookup.provider_from(peer)
  }
}

impl<L, N> NotificationApi<L::Provider> for Composed<L, N>
where
  L: PeerLookup,
  N: NotificationApi<L::Provider>,
{
  fn clients_listening(&self) -> bool {
    self.api.clients_listening()
  }

  fn raise_notification(
    &self,
    provider: &L::Provider,
    kind: NotificationKind,
    processing: NotificationProcessing,
    text: &str,
    correlation_id: &str,
  ) -> Result<(), PlatformError> {
    self
      .api
      .raise_notification(provider, kind, processing, text, correlation_id)
  }
}
