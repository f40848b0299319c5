//! Error types for `poolpass-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown resident: {0}")]
  UnknownResident(String),

  #[error("resident {0} is already checked in")]
  AlreadyPresent(String),

  #[error("resident {0} is not checked in")]
  NotPresent(String),

  #[error("guest count {requested} exceeds the per-resident limit of {max}")]
  GuestCountOutOfRange { requested: u32, max: u32 },

  /// The pool is at capacity. `remaining` is how many more people could
  /// still be admitted, for display to the person at the kiosk.
  #[error("pool is at capacity; only {remaining} more people allowed")]
  CapacityExceeded { remaining: u32 },

  #[error("resident with that id or name already exists")]
  DuplicateResident,

  /// Import/restore was given input that is not a backup snapshot.
  #[error("invalid backup format: {0}")]
  InvalidBackupFormat(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
