//! Export/import of the full record set.

use axum::{Json, extract::State, response::IntoResponse};
use poolpass_core::{snapshot::BackupSnapshot, store::RecordStore};

use crate::{AppState, error::ApiError, session::AdminAuthed};

/// `GET /admin/export` — the downloadable snapshot of every named record.
pub async fn export<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
) -> Result<Json<BackupSnapshot>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let snapshot = state
    .store
    .export_snapshot()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(snapshot))
}

/// `POST /admin/import` — wholesale replace of every named record, then
/// reload the in-memory ledger from the imported `occupancy` record.
pub async fn import<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Json(raw): Json<serde_json::Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let snapshot = BackupSnapshot::from_value(raw)?;
  state
    .store
    .import_snapshot(&snapshot)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  *state.ledger.lock().await = snapshot.data.occupancy;
  tracing::info!("records restored from snapshot");
  Ok(Json(serde_json::json!({ "imported": true })))
}
