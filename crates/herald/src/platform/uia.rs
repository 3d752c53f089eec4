/*!
Windows UI Automation binding.

`UIAutomationCore.dll` only exports `UiaRaiseNotificationEvent` from
Windows 10 1709 onwards, so both primitives are resolved at runtime with
`libloading` instead of being linked. A missing library or a missing
`UiaRaiseNotificationEvent` export surfaces as
[`PlatformError::CapabilityMissing`] on the first raise. Without the raise
export, listeners are reported as present so that first raise happens and
the gate latches.
*/

#![allow(unsafe_code)]

use libloading::Library;
use std::ffi::c_void;
use std::fmt;
use windows::core::{Interface, BSTR, HRESULT};
use windows::Win32::UI::Accessibility::IRawElementProviderSimple;

use super::traits::NotificationApi;
use crate::a11y::{NotificationKind, NotificationProcessing};
use crate::types::{HeraldError, HeraldResult, PlatformError};

const LIBRARY: &str = "UIAutomationCore.dll";
const RAISE_ENTRY_POINT: &str = "UiaRaiseNotificationEvent";
const LISTENING_ENTRY_POINT: &str = "UiaClientsAreListening";

type RaiseFn = unsafe extern "system" fn(
  provider: *mut c_void,
  kind: i32,
  processing: i32,
  display_string: *const u16,
  activity_id: *const u16,
) -> i32;

type ListeningFn = unsafe extern "system" fn() -> i32;

/// Provider handles the binding can pass to UI Automation.
///
/// Implemented for `IRawElementProviderSimple`; toolkits wrapping the
/// interface in their own handle type implement it for that type.
pub trait UiaProvider {
  /// Raw `IRawElementProviderSimple` pointer, borrowed for one call.
  fn as_raw_provider(&self) -> *mut c_void;
}

impl UiaProvider for IRawElementProviderSimple {
  fn as_raw_provider(&self) -> *mut c_void {
    self.as_raw()
  }
}

/// Runtime-resolved UI Automation notification primitives.
pub struct UiaCore {
  // Keeps the resolved function pointers valid.
  _library: Option<Library>,
  raise: Option<RaiseFn>,
  clients_listening: Option<ListeningFn>,
}

impl fmt::Debug for UiaCore {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("UiaCore")
      .field("raise", &self.raise.is_some())
      .field("clients_listening", &self.clients_listening.is_some())
      .finish_non_exhaustive()
  }
}

impl Default for UiaCore {
  fn default() -> Self {
    Self::new()
  }
}

impl UiaCore {
  /// Load the binding, tolerating a missing library.
  ///
  /// If `UIAutomationCore.dll` can't be loaded, every raise reports the
  /// capability as missing.
  pub fn new() -> Self {
    match Self::load() {
      Ok(core) => core,
      Err(err) => {
        log::warn!("UI Automation unavailable: {err}");
        Self {
          _library: None,
          raise: None,
          clients_listening: None,
        }
      }
    }
  }

  /// Load the binding, failing if the library itself can't be loaded.
  ///
  /// Missing exports are not an error here; they surface per call.
  pub fn load() -> HeraldResult<Self> {
    // SAFETY: UIAutomationCore has no initialisation routines with
    // preconditions we could violate.
    let library = unsafe { Library::new(LIBRARY) }.map_err(|e| HeraldError::LibraryUnavailable {
      library: LIBRARY.to_owned(),
      reason: e.to_string(),
    })?;

    // SAFETY: signatures match the documented exports.
    let raise = unsafe { library.get::<RaiseFn>(b"UiaRaiseNotificationEvent\0") }
      .map(|symbol| *symbol)
      .ok();
    let clients_listening = unsafe { library.get::<ListeningFn>(b"UiaClientsAreListening\0") }
      .map(|symbol| *symbol)
      .ok();

    if raise.is_none() {
      log::debug!("{LIBRARY} does not export {RAISE_ENTRY_POINT}");
    }

    Ok(Self {
      _library: Some(library),
      raise,
      clients_listening,
    })
  }

}

impl<H: UiaProvider> NotificationApi<H> for UiaCore {
  fn clients_listening(&self) -> bool {
    // Let the raise report the missing primitive so the gate latches.
    if self.raise.is_none() {
      return true;
    }
    let Some(listening) = self.clients_listening else {
      log::trace!("{LISTENING_ENTRY_POINT} missing, assuming listeners");
      return true;
    };
    // SAFETY: no arguments, returns a BOOL.
    unsafe { listening() != 0 }
  }

  fn raise_notification(
    &self,
    provider: &H,
    kind: NotificationKind,
    processing: NotificationProcessing,
    text: &str,
    correlation_id: &str,
  ) -> Result<(), PlatformError> {
    let Some(raise) = self.raise else {
      return Err(PlatformError::missing(RAISE_ENTRY_POINT));
    };

    let display_string = BSTR::from(text);
    let activity_id = BSTR::from(correlation_id);

    // SAFETY: `provider` is a live COM interface borrowed for the duration
    // of the call; both BSTRs outlive it.
    let code = unsafe {
      raise(
        provider.as_raw_provider(),
        kind.as_raw(),
        processing.as_raw(),
        display_string.as_ptr(),
        activity_id.as_ptr(),
      )
    };

    let hr = HRESULT(code);
    if hr.is_ok() {
      Ok(())
    } else {
      Err(PlatformError::CallFailed {
        code,
        message: hr.message(),
      })
    }
  }
}
