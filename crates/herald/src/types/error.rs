/*! Error types for Herald operations. */

/// Tagged failure reported by a platform binding's notification call.
///
/// Bindings translate their native failure modes into one of these two tags
/// so the emitter only ever branches on the tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
  /// The notification primitive itself is absent from the platform
  /// (missing library or missing entry point). Irrecoverable for the
  /// lifetime of the process.
  #[error("Entry point not found: {entry_point}")]
  CapabilityMissing { entry_point: String },

  /// The primitive exists but the call reported a failure.
  #[error("Notification call failed ({code:#x}): {message}")]
  CallFailed { code: i32, message: String },
}

impl PlatformError {
  /// Shorthand for [`PlatformError::CapabilityMissing`].
  pub fn missing(entry_point: impl Into<String>) -> Self {
    Self::CapabilityMissing {
      entry_point: entry_point.into(),
    }
  }

  /// Whether this failure proves the capability is absent.
  pub const fn is_capability_missing(&self) -> bool {
    matches!(self, Self::CapabilityMissing { .. })
  }
}

/// Errors from constructing Herald components.
///
/// The notification path itself never returns errors; these only surface
/// while loading bindings or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum HeraldError {
  #[error("Failed to load {library}: {reason}")]
  LibraryUnavailable { library: String, reason: String },

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),
}

impl From<serde_json::Error> for HeraldError {
  fn from(err: serde_json::Error) -> Self {
    Self::InvalidConfig(err.to_string())
  }
}

/// Result type for Herald construction paths.
pub type HeraldResult<T> = Result<T, HeraldError>;
