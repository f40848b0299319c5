//! Pool status: the open/closed/warning flag shown on the home screen.
//!
//! Status lives in API state rather than in a named record — in the system
//! this is ported from it sat in loose storage keys outside the record set,
//! so it does not survive a restart (it reverts to `open`).

use std::sync::{Arc, Mutex};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use poolpass_core::{settings::PoolHours, store::RecordStore};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, session::AdminAuthed};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
  #[default]
  Open,
  Closed,
  Warning,
}

/// Shared status flag plus optional display message.
#[derive(Clone, Default)]
pub struct StatusState {
  inner: Arc<Mutex<(PoolStatus, Option<String>)>>,
}

impl StatusState {
  pub fn get(&self) -> (PoolStatus, Option<String>) {
    self.inner.lock().expect("status poisoned").clone()
  }

  pub fn set(&self, status: PoolStatus, message: Option<String>) {
    *self.inner.lock().expect("status poisoned") = (status, message);
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
  pub status:        PoolStatus,
  pub message:       Option<String>,
  pub pool_name:     String,
  pub pool_hours:    PoolHours,
  pub current_count: u32,
  pub max_count:     u32,
}

/// `GET /status`
pub async fn current<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<StatusResponse>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let settings = state
    .store
    .load_settings()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let (status, message) = state.status.get();
  let (current_count, max_count) = {
    let ledger = state.ledger.lock().await;
    (ledger.current_count, ledger.max_count)
  };

  Ok(Json(StatusResponse {
    status,
    message,
    pool_name: settings.pool_name,
    pool_hours: settings.pool_hours,
    current_count,
    max_count,
  }))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
  pub status:  PoolStatus,
  pub message: Option<String>,
}

/// `PUT /admin/status`
pub async fn set<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Json(body): Json<SetStatusBody>,
) -> impl IntoResponse
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let message = body
    .message
    .map(|m| m.trim().to_string())
    .filter(|m| !m.is_empty());
  state.status.set(body.status, message);
  tracing::info!(status = ?body.status, "pool status changed");
  StatusCode::NO_CONTENT
}
