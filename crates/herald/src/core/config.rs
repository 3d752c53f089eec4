/*!
Notification defaults and failure policy.

The kind and processing values used for element requests are a policy
choice of the integrator, not something the emitter hardwires.
*/

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::a11y::{NotificationKind, NotificationProcessing};
use crate::types::HeraldResult;

/// What to do when the primitive exists but a call to it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FailurePolicy {
  /// Log the failure, broadcast `notification:failed`, keep trying next time.
  #[default]
  LogAndContinue,
  /// Treat the failure like a missing entry point and latch the gate.
  Latch,
}

/// Configuration shared by every emitter created from one `Herald`.
///
/// # Example
///
/// ```
/// use herald::{FailurePolicy, NotifyConfig};
/// use herald::a11y::NotificationKind;
///
/// let config = NotifyConfig::from_json(r#"{ "default_kind": "item_added" }"#).unwrap();
/// assert_eq!(config.default_kind, NotificationKind::ItemAdded);
/// assert_eq!(config.on_call_failure, FailurePolicy::LogAndContinue);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct NotifyConfig {
  /// Kind used by `request_notification`. Default: `ActionCompleted`.
  pub default_kind: NotificationKind,
  /// Processing used by `request_notification`. Default: `ImportantMostRecent`.
  pub default_processing: NotificationProcessing,
  /// Handling of call failures other than a missing entry point.
  pub on_call_failure: FailurePolicy,
}

impl NotifyConfig {
  /// Parse from JSON. Missing fields take their defaults.
  pub fn from_json(json: &str) -> HeraldResult<Self> {
    Ok(serde_json::from_str(json)?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::HeraldError;

  #[test]
  fn empty_object_is_default() {
    assert_eq!(NotifyConfig::from_json("{}").unwrap(), NotifyConfig::default());
  }

  #[test]
  fn parses_every_field() {
    let config = NotifyConfig::from_json(
      r#"{
        "default_kind": "action_aborted",
        "default_processing": "most_recent",
        "on_call_failure": "latch"
      }"#,
    )
    .unwrap();
    assert_eq!(config.default_kind, NotificationKind::ActionAborted);
    assert_eq!(config.default_processing, NotificationProcessing::MostRecent);
    assert_eq!(config.on_call_failure, FailurePolicy::Latch);
  }

  #[test]
  fn rejects_unknown_values() {
    let err = NotifyConfig::from_json(r#"{ "default_kind": "loud" }"#).unwrap_err();
    assert!(matches!(err, HeraldError::InvalidConfig(_)));
  }
}
