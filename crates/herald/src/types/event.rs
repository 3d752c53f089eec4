/*! Events broadcast to subscribers as notifications are processed. */

use super::{CorrelationId, NotificationRequest, SkipReason};
use serde::Serialize;
use ts_rs::TS;

/// Events emitted by a [`Herald`](crate::Herald) instance.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export)]
pub enum Event {
  #[serde(rename = "notification:raised")]
  NotificationRaised { request: NotificationRequest },

  #[serde(rename = "notification:skipped")]
  NotificationSkipped {
    correlation_id: CorrelationId,
    reason: SkipReason,
  },

  // Primitive present but the call failed
  #[serde(rename = "notification:failed")]
  NotificationFailed {
    request: NotificationRequest,
    code: i32,
    message: String,
  },

  // Latch flipped; emitted once per gate
  #[serde(rename = "capability:lost")]
  CapabilityLost { reason: String },
}
