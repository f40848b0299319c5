//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// Admission refused: the pool is at capacity. Carries the remaining
  /// headroom so the kiosk can display it.
  #[error("pool is at capacity; only {remaining} more people allowed")]
  CapacityExceeded { remaining: u32 },

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<poolpass_core::Error> for ApiError {
  fn from(e: poolpass_core::Error) -> Self {
    use poolpass_core::Error as Core;
    match e {
      Core::UnknownResident(_) | Core::NotPresent(_) => {
        ApiError::NotFound(e.to_string())
      }
      Core::AlreadyPresent(_) | Core::DuplicateResident => {
        ApiError::Conflict(e.to_string())
      }
      Core::CapacityExceeded { remaining } => {
        ApiError::CapacityExceeded { remaining }
      }
      Core::GuestCountOutOfRange { .. } => {
        ApiError::Unprocessable(e.to_string())
      }
      Core::InvalidBackupFormat(_) => ApiError::BadRequest(e.to_string()),
      Core::Serialization(_) => ApiError::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Unauthorized => {
        (StatusCode::UNAUTHORIZED, json!({ "error": "unauthorized" }))
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, json!({ "error": m })),
      ApiError::CapacityExceeded { remaining } => (
        StatusCode::CONFLICT,
        json!({ "error": self.to_string(), "remaining": remaining }),
      ),
      ApiError::Unprocessable(m) => {
        (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": m }))
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, json!({ "error": m }))
      }
      ApiError::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": e.to_string() }),
      ),
    };
    (status, Json(body)).into_response()
  }
}
