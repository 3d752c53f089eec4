/*!
Notification kind and processing policy.

Both are passed through to the platform untouched. Raw discriminants match
UI Automation's `NotificationKind` / `NotificationProcessing` so bindings can
forward them as plain integers.
*/

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Semantic category of a notification.
///
/// Informational only: clients may use it to pick an earcon or a verbosity
/// level, but the platform never changes delivery based on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NotificationKind {
  /// An item was added to a collection.
  ItemAdded,
  /// An item was removed from a collection.
  ItemRemoved,
  /// A user-initiated action finished (e.g. a response is ready).
  #[default]
  ActionCompleted,
  /// A user-initiated action was cancelled or failed.
  ActionAborted,
  /// Anything else.
  Other,
}

impl NotificationKind {
  /// All kinds, in raw-value order.
  pub const ALL: [Self; 5] = [
    Self::ItemAdded,
    Self::ItemRemoved,
    Self::ActionCompleted,
    Self::ActionAborted,
    Self::Other,
  ];

  /// Raw platform value.
  ///
  /// ```
  /// use herald::a11y::NotificationKind;
  ///
  /// assert_eq!(NotificationKind::ItemAdded.as_raw(), 0);
  /// assert_eq!(NotificationKind::ActionCompleted.as_raw(), 2);
  /// ```
  pub const fn as_raw(self) -> i32 {
    match self {
      Self::ItemAdded => 0,
      Self::ItemRemoved => 1,
      Self::ActionCompleted => 2,
      Self::ActionAborted => 3,
      Self::Other => 4,
    }
  }

  /// Map a raw platform value back. Unknown values yield `None`.
  pub const fn from_raw(raw: i32) -> Option<Self> {
    match raw {
      0 => Some(Self::ItemAdded),
      1 => Some(Self::ItemRemoved),
      2 => Some(Self::ActionCompleted),
      3 => Some(Self::ActionAborted),
      4 => Some(Self::Other),
      _ => None,
    }
  }
}

/// Delivery and coalescing policy requested from the platform.
///
/// Advisory: the platform (and the listening client) decide what actually
/// happens when notifications pile up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NotificationProcessing {
  /// Important; deliver every notification in order.
  ImportantAll,
  /// Important; only the most recent one with the same correlation id matters.
  #[default]
  ImportantMostRecent,
  /// Deliver every notification in order.
  All,
  /// Only the most recent one with the same correlation id matters.
  MostRecent,
  /// Finish the current one, then deliver only the most recent.
  CurrentThenMostRecent,
}

impl NotificationProcessing {
  /// All policies, in raw-value order.
  pub const ALL: [Self; 5] = [
    Self::ImportantAll,
    Self::ImportantMostRecent,
    Self::All,
    Self::MostRecent,
    Self::CurrentThenMostRecent,
  ];

  /// Raw platform value.
  ///
  /// ```
  /// use herald::a11y::NotificationProcessing;
  ///
  /// assert_eq!(NotificationProcessing::ImportantMostRecent.as_raw(), 1);
  /// assert_eq!(NotificationProcessing::CurrentThenMostRecent.as_raw(), 4);
  /// ```
  pub const fn as_raw(self) -> i32 {
    match self {
      Self::ImportantAll => 0,
      Self::ImportantMostRecent => 1,
      Self::All => 2,
      Self::MostRecent => 3,
      Self::CurrentThenMostRecent => 4,
    }
  }

  /// Map a raw platform value back. Unknown values yield `None`.
  pub const fn from_raw(raw: i32) -> Option<Self> {
    match raw {
      0 => Some(Self::ImportantAll),
      1 => Some(Self::ImportantMostRecent),
      2 => Some(Self::All),
      3 => Some(Self::MostRecent),
      4 => Some(Self::CurrentThenMostRecent),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn raw_values_follow_declaration_order() {
    for (i, kind) in NotificationKind::ALL.iter().enumerate() {
      assert_eq!(kind.as_raw(), i32::try_from(i).unwrap());
      assert_eq!(NotificationKind::from_raw(kind.as_raw()), Some(*kind));
    }
    for (i, processing) in NotificationProcessing::ALL.iter().enumerate() {
      assert_eq!(processing.as_raw(), i32::try_from(i).unwrap());
      assert_eq!(
        NotificationProcessing::from_raw(processing.as_raw()),
        Some(*processing)
      );
    }
  }

  #[test]
  fn unknown_raw_values_are_rejected() {
    assert_eq!(NotificationKind::from_raw(5), None);
    assert_eq!(NotificationKind::from_raw(-1), None);
    assert_eq!(NotificationProcessing::from_raw(42), None);
  }

  #[test]
  fn defaults_match_response_ready_announcements() {
    assert_eq!(NotificationKind::default(), NotificationKind::ActionCompleted);
    assert_eq!(
      NotificationProcessing::default(),
      NotificationProcessing::ImportantMostRecent
    );
  }

  #[test]
  fn serializes_as_snake_case() {
    assert_eq!(
      serde_json::to_string(&NotificationKind::ActionCompleted).unwrap(),
      "\"action_completed\""
    );
    let parsed: NotificationProcessing = serde_json::from_str("\"current_then_most_recent\"").unwrap();
    assert_eq!(parsed, NotificationProcessing::CurrentThenMostRecent);
  }
}
