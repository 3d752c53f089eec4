/*!
Accessibility handle resolution with memoization on success.

A failed lookup is not cached: the element may simply not be in the
accessibility tree yet, so the next request asks again. A successful lookup
is cached for the owner's lifetime and never re-resolved.
*/

use crate::platform::PeerLookup;

/// Two-state provider cache owned by one emitter.
#[derive(Debug, Clone, Default)]
pub(crate) enum HandleCache<H> {
  #[default]
  NotResolved,
  Resolved(H),
}

impl<H: Clone> HandleCache<H> {
  /// Return the cached provider, or look it up and cache it.
  pub(crate) fn resolve<L>(&mut self, lookup: &L, element: &L::Element) -> Option<H>
  where
    L: PeerLookup<Provider = H> + ?Sized,
  {
    if let Self::Resolved(provider) = self {
      return Some(provider.clone());
    }

    let peer = lookup.peer_for(element)?;
    let provider = lookup.provider_from(&peer);
    *self = Self::Resolved(provider.clone());
    Some(provider)
  }

  pub(crate) const fn is_resolved(&self) -> bool {
    matches!(self, Self::Resolved(_))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::memory::{MemoryElement, MemoryPlatform};

  #[test]
  fn missing_peer_leaves_cache_unresolved() {
    let platform = MemoryPlatform::new();
    let element = MemoryElement::new();
    let mut cache = HandleCache::default();

    assert!(cache.resolve(&platform, &element).is_none());
    assert!(!cache.is_resolved());
    assert_eq!(platform.stats().provider_derivations, 0);
  }

  #[test]
  fn unresolved_lookups_are_retried() {
    let platform = MemoryPlatform::new();
    let element = MemoryElement::new();
    let mut cache = HandleCache::default();

    assert!(cache.resolve(&platform, &element).is_none());
    platform.realize(&element);
    let provider = cache.resolve(&platform, &element).unwrap();

    assert_eq!(provider.element, element.id());
    assert!(cache.is_resolved());
    assert_eq!(platform.stats().peer_lookups, 2);
  }

  #[test]
  fn resolved_provider_is_sticky() {
    let platform = MemoryPlatform::new();
    let element = MemoryElement::new();
    platform.realize(&element);
    let mut cache = HandleCache::default();

    let first = cache.resolve(&platform, &element).unwrap();
    platform.unrealize(&element);
    let second = cache.resolve(&platform, &element).unwrap();

    assert_eq!(first, second);
    assert_eq!(platform.stats().peer_lookups, 1);
    assert_eq!(platform.stats().provider_derivations, 1);
  }
}
