//! Handlers for the occupancy ledger: self-service check-in/out, the public
//! occupancy view, and the administrative overrides.
//!
//! Every mutation runs under the ledger mutex and persists the whole
//! `occupancy` record as one write before the response is returned, so each
//! operation is atomic from the caller's perspective.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use poolpass_core::{
  ledger::{CheckedInEntry, ClampWarning, OccupancyLedger},
  store::RecordStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, session::AdminAuthed};

// ─── Public views ────────────────────────────────────────────────────────────

/// `GET /occupancy` — the full ledger.
pub async fn ledger<S>(
  State(state): State<AppState<S>>,
) -> Json<OccupancyLedger>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  Json(state.ledger.lock().await.clone())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
  pub total_residents:      usize,
  pub current_occupancy:    u32,
  pub currently_checked_in: usize,
  pub total_incidents:      usize,
  pub today_checkins:       u32,
}

/// `GET /stats`
pub async fn stats<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Stats>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let directory = state
    .store
    .load_residents()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let incidents = state
    .store
    .load_incidents()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let ledger = state.ledger.lock().await;

  Ok(Json(Stats {
    total_residents:      directory.residents.len(),
    current_occupancy:    ledger.current_count,
    currently_checked_in: ledger.currently_checked_in.len(),
    total_incidents:      incidents.incidents.len(),
    today_checkins:       ledger.today.total_checkins,
  }))
}

// ─── Self-service check-in/out ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinBody {
  pub resident_id: String,
  #[serde(default)]
  pub guest_count: u32,
}

/// `POST /checkin` — 201 + the created entry.
pub async fn check_in<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CheckinBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let directory = state
    .store
    .load_residents()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let settings = state
    .store
    .load_settings()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut ledger = state.ledger.lock().await;
  let entry = ledger.check_in(
    &directory,
    &body.resident_id,
    body.guest_count,
    settings.max_guests_per_resident,
    Utc::now(),
  )?;
  persist(&state, &ledger).await?;

  tracing::info!(
    resident = %entry.id,
    guests = entry.guest_count,
    count = ledger.current_count,
    "checked in"
  );
  Ok((StatusCode::CREATED, Json(entry)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
  pub resident_id: String,
}

/// `POST /checkout` — 200 + the removed entry.
pub async fn check_out<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<CheckoutBody>,
) -> Result<Json<CheckedInEntry>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let mut ledger = state.ledger.lock().await;
  let entry = ledger.check_out(&body.resident_id)?;
  persist(&state, &ledger).await?;

  tracing::info!(resident = %entry.id, count = ledger.current_count, "checked out");
  Ok(Json(entry))
}

// ─── Administrative overrides ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetCountBody {
  pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCountResponse {
  pub current_count: u32,
  /// Present when the requested value exceeded `max_count` and was clamped.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub clamped_to_max: Option<ClampWarning>,
}

/// `PUT /admin/occupancy/count` — unconditional override of the count alone.
pub async fn set_count<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Json(body): Json<SetCountBody>,
) -> Result<Json<SetCountResponse>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let mut ledger = state.ledger.lock().await;
  let clamped_to_max = ledger.admin_set_count(body.count);
  persist(&state, &ledger).await?;

  if let Some(warning) = &clamped_to_max {
    tracing::warn!(requested = warning.requested, max = warning.max, "count clamped to max");
  }
  Ok(Json(SetCountResponse {
    current_count: ledger.current_count,
    clamped_to_max,
  }))
}

/// `POST /admin/occupancy/reset` — zero the count, clear the active set.
pub async fn reset<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
) -> Result<Json<OccupancyLedger>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let mut ledger = state.ledger.lock().await;
  ledger.admin_reset();
  persist(&state, &ledger).await?;

  tracing::info!("occupancy reset to 0");
  Ok(Json(ledger.clone()))
}

/// `POST /admin/occupancy/checkout` — force-checkout from the admin surface.
/// The destructive-action confirmation happens client-side.
pub async fn force_checkout<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Json(body): Json<CheckoutBody>,
) -> Result<Json<CheckedInEntry>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let mut ledger = state.ledger.lock().await;
  let entry = ledger.admin_force_checkout(&body.resident_id)?;
  persist(&state, &ledger).await?;

  tracing::info!(resident = %entry.id, "force checkout");
  Ok(Json(entry))
}

// ─── Persistence ─────────────────────────────────────────────────────────────

async fn persist<S>(
  state: &AppState<S>,
  ledger: &OccupancyLedger,
) -> Result<(), ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  state
    .store
    .save_occupancy(ledger)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))
}
