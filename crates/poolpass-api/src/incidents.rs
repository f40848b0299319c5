//! Handlers for the staff incident log. Admin-only in both directions.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use poolpass_core::{incident::IncidentLog, store::RecordStore};
use serde::Deserialize;

use crate::{AppState, error::ApiError, session::AdminAuthed};

/// `GET /admin/incidents` — newest first.
pub async fn list<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
) -> Result<Json<IncidentLog>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let log = state
    .store
    .load_incidents()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(log))
}

#[derive(Debug, Deserialize)]
pub struct NewIncidentBody {
  pub description: String,
  #[serde(default)]
  pub author:      String,
}

/// `POST /admin/incidents` — 201 + the logged incident.
pub async fn create<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Json(body): Json<NewIncidentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  if body.description.trim().is_empty() {
    return Err(ApiError::BadRequest(
      "incident description is required".to_string(),
    ));
  }

  let mut log = state
    .store
    .load_incidents()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let incident = log.log(&body.description, &body.author, Utc::now());
  state
    .store
    .save_incidents(&log)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(id = %incident.id, "incident logged");
  Ok((StatusCode::CREATED, Json(incident)))
}
