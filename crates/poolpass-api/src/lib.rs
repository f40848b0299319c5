//! JSON REST API for PoolPass.
//!
//! Exposes an axum [`Router`] backed by any [`poolpass_core::store::RecordStore`].
//! TLS, static assets, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", poolpass_api::api_router(state))
//! ```

pub mod backup;
pub mod error;
pub mod incidents;
pub mod notices;
pub mod occupancy;
pub mod residents;
pub mod session;
pub mod status;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use poolpass_core::{ledger::OccupancyLedger, store::RecordStore};
use tokio::sync::Mutex;

pub use error::ApiError;
use session::AdminSessions;
use status::StatusState;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The occupancy ledger is the one record with read-modify-write contention,
/// so it lives in memory behind a mutex and is written through to the store
/// after each mutation. Everything else is load-modify-save per request.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store:    Arc<S>,
  pub ledger:   Arc<Mutex<OccupancyLedger>>,
  pub status:   StatusState,
  pub sessions: AdminSessions,
}

impl<S> AppState<S>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  /// Build the state for `store`, loading the occupancy ledger into memory.
  pub async fn initialize(store: Arc<S>) -> Result<Self, S::Error> {
    let ledger = store.load_occupancy().await?;
    Ok(Self {
      store,
      ledger: Arc::new(Mutex::new(ledger)),
      status: StatusState::default(),
      sessions: AdminSessions::default(),
    })
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Kiosk surface
    .route("/status", get(status::current::<S>))
    .route("/occupancy", get(occupancy::ledger::<S>))
    .route("/stats", get(occupancy::stats::<S>))
    .route("/residents", get(residents::list::<S>))
    .route("/notices", get(notices::list::<S>))
    .route("/checkin", post(occupancy::check_in::<S>))
    .route("/checkout", post(occupancy::check_out::<S>))
    // Admin surface
    .route("/admin/login", post(session::login::<S>))
    .route("/admin/logout", post(session::logout::<S>))
    .route("/admin/status", put(status::set::<S>))
    .route("/admin/occupancy/count", put(occupancy::set_count::<S>))
    .route("/admin/occupancy/reset", post(occupancy::reset::<S>))
    .route("/admin/occupancy/checkout", post(occupancy::force_checkout::<S>))
    .route("/admin/residents", post(residents::create::<S>))
    .route("/admin/notices", post(notices::create::<S>))
    .route("/admin/notices/{index}", delete(notices::remove::<S>))
    .route(
      "/admin/incidents",
      get(incidents::list::<S>).post(incidents::create::<S>),
    )
    .route("/admin/export", get(backup::export::<S>))
    .route("/admin/import", post(backup::import::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use poolpass_store_json::JsonFileStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_state() -> AppState<JsonFileStore> {
    let dir =
      std::env::temp_dir().join(format!("poolpass-api-test-{}", Uuid::new_v4()));
    let store = JsonFileStore::open(&dir).await.unwrap();
    AppState::initialize(Arc::new(store)).await.unwrap()
  }

  async fn oneshot_json(
    state: AppState<JsonFileStore>,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header("x-admin-token", token);
    }
    let req = match body {
      Some(body) => builder
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = api_router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  /// Log in with the default PIN and return the bearer token.
  async fn admin_token(state: AppState<JsonFileStore>) -> String {
    let (status, body) = oneshot_json(
      state,
      "POST",
      "/admin/login",
      None,
      Some(json!({ "pin": "1234" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
  }

  // ── Status ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn status_defaults_to_open() {
    let state = make_state().await;
    let (status, body) =
      oneshot_json(state, "GET", "/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "open");
    assert_eq!(body["currentCount"], 0);
    assert_eq!(body["maxCount"], 50);
    assert_eq!(body["poolName"], "Community Pool");
  }

  #[tokio::test]
  async fn admin_can_set_status_with_message() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    let (status, _) = oneshot_json(
      state.clone(),
      "PUT",
      "/admin/status",
      Some(&token),
      Some(json!({ "status": "warning", "message": "  storm approaching  " })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = oneshot_json(state, "GET", "/status", None, None).await;
    assert_eq!(body["status"], "warning");
    assert_eq!(body["message"], "storm approaching");
  }

  // ── Check-in / check-out ────────────────────────────────────────────────

  #[tokio::test]
  async fn check_in_and_out_round_trip() {
    let state = make_state().await;

    let (status, entry) = oneshot_json(
      state.clone(),
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP001", "guestCount": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["id"], "PP001");
    assert_eq!(entry["name"], "John Smith");
    assert_eq!(entry["guestCount"], 2);

    let (_, ledger) =
      oneshot_json(state.clone(), "GET", "/occupancy", None, None).await;
    assert_eq!(ledger["currentCount"], 3);
    assert_eq!(ledger["currentlyCheckedIn"].as_array().unwrap().len(), 1);
    assert_eq!(ledger["today"]["totalCheckins"], 3);
    assert_eq!(ledger["today"]["peakOccupancy"], 3);

    let (status, out) = oneshot_json(
      state.clone(),
      "POST",
      "/checkout",
      None,
      Some(json!({ "residentId": "PP001" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["id"], "PP001");

    let (_, ledger) = oneshot_json(state, "GET", "/occupancy", None, None).await;
    assert_eq!(ledger["currentCount"], 0);
    assert!(ledger["currentlyCheckedIn"].as_array().unwrap().is_empty());
    // Daily totals are not unwound by a check-out.
    assert_eq!(ledger["today"]["totalCheckins"], 3);
  }

  #[tokio::test]
  async fn duplicate_check_in_returns_409() {
    let state = make_state().await;
    let body = json!({ "residentId": "PP002" });

    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/checkin",
      None,
      Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) =
      oneshot_json(state, "POST", "/checkin", None, Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["error"].as_str().unwrap().contains("PP002"));
  }

  #[tokio::test]
  async fn unknown_resident_returns_404() {
    let state = make_state().await;
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP999" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn too_many_guests_returns_422() {
    let state = make_state().await;
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP001", "guestCount": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }

  #[tokio::test]
  async fn capacity_refusal_reports_remaining_headroom() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    // Force the count to one below the default max of 50.
    let (status, _) = oneshot_json(
      state.clone(),
      "PUT",
      "/admin/occupancy/count",
      Some(&token),
      Some(json!({ "count": 49 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A party of 3 does not fit into headroom 1.
    let (status, err) = oneshot_json(
      state.clone(),
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP001", "guestCount": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["remaining"], 1);

    // A party of exactly 1 still fits.
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP001" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }

  #[tokio::test]
  async fn checkout_when_not_present_returns_404() {
    let state = make_state().await;
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/checkout",
      None,
      Some(json!({ "residentId": "PP001" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Admin auth ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn admin_routes_require_a_live_token() {
    let state = make_state().await;

    let (status, _) = oneshot_json(
      state.clone(),
      "PUT",
      "/admin/occupancy/count",
      None,
      Some(json!({ "count": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let bogus = Uuid::new_v4().to_string();
    let (status, _) = oneshot_json(
      state,
      "GET",
      "/admin/incidents",
      Some(&bogus),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn wrong_pin_is_rejected() {
    let state = make_state().await;
    let (status, _) = oneshot_json(
      state,
      "POST",
      "/admin/login",
      None,
      Some(json!({ "pin": "0000" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn logout_revokes_the_token() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/admin/logout",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = oneshot_json(
      state,
      "GET",
      "/admin/incidents",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  // ── Admin occupancy overrides ───────────────────────────────────────────

  #[tokio::test]
  async fn set_count_clamps_and_reports_it() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    let (status, body) = oneshot_json(
      state.clone(),
      "PUT",
      "/admin/occupancy/count",
      Some(&token),
      Some(json!({ "count": 120 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentCount"], 50);
    assert_eq!(body["clampedToMax"]["requested"], 120);
    assert_eq!(body["clampedToMax"]["max"], 50);

    // In-range values carry no warning.
    let (_, body) = oneshot_json(
      state,
      "PUT",
      "/admin/occupancy/count",
      Some(&token),
      Some(json!({ "count": 7 })),
    )
    .await;
    assert_eq!(body["currentCount"], 7);
    assert!(body.get("clampedToMax").is_none());
  }

  #[tokio::test]
  async fn reset_clears_count_but_keeps_daily_totals() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    oneshot_json(
      state.clone(),
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP001", "guestCount": 1 })),
    )
    .await;

    let (status, ledger) = oneshot_json(
      state,
      "POST",
      "/admin/occupancy/reset",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ledger["currentCount"], 0);
    assert!(ledger["currentlyCheckedIn"].as_array().unwrap().is_empty());
    assert_eq!(ledger["today"]["totalCheckins"], 2);
  }

  #[tokio::test]
  async fn force_checkout_removes_the_entry() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    oneshot_json(
      state.clone(),
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP003" })),
    )
    .await;

    let (status, out) = oneshot_json(
      state.clone(),
      "POST",
      "/admin/occupancy/checkout",
      Some(&token),
      Some(json!({ "residentId": "PP003" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(out["id"], "PP003");

    let (_, ledger) = oneshot_json(state, "GET", "/occupancy", None, None).await;
    assert_eq!(ledger["currentCount"], 0);
  }

  // ── Residents / notices / incidents ─────────────────────────────────────

  #[tokio::test]
  async fn admin_adds_a_resident() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    let (status, resident) = oneshot_json(
      state.clone(),
      "POST",
      "/admin/residents",
      Some(&token),
      Some(json!({ "name": "Grace Hopper" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resident["id"], "PP009");

    // Duplicates conflict.
    let (status, _) = oneshot_json(
      state.clone(),
      "POST",
      "/admin/residents",
      Some(&token),
      Some(json!({ "name": "Grace Hopper" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, dir) = oneshot_json(state, "GET", "/residents", None, None).await;
    assert_eq!(dir["residents"].as_array().unwrap().len(), 9);
  }

  #[tokio::test]
  async fn notices_are_added_newest_first_and_removed_by_index() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    let (status, notice) = oneshot_json(
      state.clone(),
      "POST",
      "/admin/notices",
      Some(&token),
      Some(json!({ "text": "Pool closes early <today>" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(notice["text"], "Pool closes early today");

    let (_, board) = oneshot_json(
      state.clone(),
      "GET",
      "/notices",
      None,
      None,
    )
    .await;
    assert_eq!(
      board["currentNotices"][0]["text"],
      "Pool closes early today"
    );

    let (status, removed) = oneshot_json(
      state.clone(),
      "DELETE",
      "/admin/notices/0",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["text"], "Pool closes early today");

    let (status, _) = oneshot_json(
      state,
      "DELETE",
      "/admin/notices/99",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn incidents_log_newest_first() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    let (status, incident) = oneshot_json(
      state.clone(),
      "POST",
      "/admin/incidents",
      Some(&token),
      Some(json!({ "description": "Slip near the deep end", "author": "Sam" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(incident["description"], "Slip near the deep end");

    let (_, log) = oneshot_json(
      state,
      "GET",
      "/admin/incidents",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(log["incidents"][0]["author"], "Sam");
  }

  // ── Backup ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn export_then_import_restores_the_ledger() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    oneshot_json(
      state.clone(),
      "POST",
      "/checkin",
      None,
      Some(json!({ "residentId": "PP001", "guestCount": 3 })),
    )
    .await;

    let (status, snapshot) = oneshot_json(
      state.clone(),
      "GET",
      "/admin/export",
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["data"]["occupancy"]["currentCount"], 4);

    // Drift the live state, then restore.
    oneshot_json(
      state.clone(),
      "POST",
      "/admin/occupancy/reset",
      Some(&token),
      None,
    )
    .await;

    let (status, body) = oneshot_json(
      state.clone(),
      "POST",
      "/admin/import",
      Some(&token),
      Some(snapshot),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imported"], true);

    let (_, ledger) = oneshot_json(state, "GET", "/occupancy", None, None).await;
    assert_eq!(ledger["currentCount"], 4);
  }

  #[tokio::test]
  async fn import_rejects_a_payload_without_data() {
    let state = make_state().await;
    let token = admin_token(state.clone()).await;

    let (status, _) = oneshot_json(
      state,
      "POST",
      "/admin/import",
      Some(&token),
      Some(json!({ "exportDate": "2026-08-25T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
