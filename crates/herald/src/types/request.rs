/*! Notification request value. */

use crate::a11y::{NotificationKind, NotificationProcessing};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Stable identifier grouping related notifications.
///
/// Clients use it to coalesce or replace earlier notifications that share it.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Display, From, Into, Default,
)]
#[ts(export)]
pub struct CorrelationId(pub String);

impl CorrelationId {
  /// Borrow the raw identifier.
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for CorrelationId {
  fn from(id: &str) -> Self {
    Self(id.to_owned())
  }
}

/// A single notification to announce. Built per call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NotificationRequest {
  text: String,
  correlation_id: CorrelationId,
  kind: NotificationKind,
  processing: NotificationProcessing,
}

impl NotificationRequest {
  /// Create a request.
  pub fn new(
    text: impl Into<String>,
    correlation_id: impl Into<CorrelationId>,
    kind: NotificationKind,
    processing: NotificationProcessing,
  ) -> Self {
    Self {
      text: text.into(),
      correlation_id: correlation_id.into(),
      kind,
      processing,
    }
  }

  /// Text spoken or brailled by the client.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Identifier grouping related notifications.
  pub const fn correlation_id(&self) -> &CorrelationId {
    &self.correlation_id
  }

  /// Semantic category.
  pub const fn kind(&self) -> NotificationKind {
    self.kind
  }

  /// Requested delivery policy.
  pub const fn processing(&self) -> NotificationProcessing {
    self.processing
  }
}
