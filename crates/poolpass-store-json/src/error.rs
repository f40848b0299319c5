//! Error type for `poolpass-store-json`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] poolpass_core::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A named record was requested but its document does not exist.
  #[error("record not found: {0}")]
  RecordNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
