//! Handlers for the resident directory.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use poolpass_core::{resident::ResidentDirectory, store::RecordStore};
use serde::Deserialize;

use crate::{AppState, error::ApiError, session::AdminAuthed};

/// `GET /residents`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<ResidentDirectory>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let directory = state
    .store
    .load_residents()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(directory))
}

#[derive(Debug, Deserialize)]
pub struct NewResidentBody {
  pub name: String,
  /// Pass id; a free `PP###` id is generated when omitted.
  pub id:   Option<String>,
}

/// `POST /admin/residents` — 201 + the added resident; 409 on duplicate.
pub async fn create<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Json(body): Json<NewResidentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  if body.name.trim().is_empty() {
    return Err(ApiError::BadRequest("resident name is required".to_string()));
  }

  let mut directory = state
    .store
    .load_residents()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let resident = directory.add(&body.name, body.id)?;
  state
    .store
    .save_residents(&directory)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(id = %resident.id, "resident added");
  Ok((StatusCode::CREATED, Json(resident)))
}
