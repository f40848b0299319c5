//! Admin sessions: PIN login, sliding expiry, and the request extractor.
//!
//! A session is a bearer token handed out after a successful PIN check and
//! sent back on each admin request in the `X-Admin-Token` header. Expiry is
//! checked on each admin action — there is no background reaper — and every
//! successful use slides the deadline forward by the configured timeout.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, StatusCode, request::Parts},
  response::IntoResponse,
};
use chrono::{DateTime, Duration, Utc};
use poolpass_core::store::RecordStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

const TOKEN_HEADER: &str = "x-admin-token";

// ─── Session table ───────────────────────────────────────────────────────────

struct Session {
  expires_at: DateTime<Utc>,
  /// Idle timeout captured from settings at login time.
  timeout:    Duration,
}

/// Shared table of live admin sessions. Cloning is cheap.
#[derive(Clone, Default)]
pub struct AdminSessions {
  inner: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl AdminSessions {
  /// Issue a fresh token expiring `timeout` from `now`.
  pub fn issue(&self, timeout: Duration, now: DateTime<Utc>) -> (Uuid, DateTime<Utc>) {
    let token = Uuid::new_v4();
    let expires_at = now + timeout;
    self
      .inner
      .lock()
      .expect("session table poisoned")
      .insert(token, Session { expires_at, timeout });
    (token, expires_at)
  }

  /// Validate `token` at `now`. A live session has its expiry slid forward;
  /// an expired one is dropped from the table.
  pub fn touch(&self, token: Uuid, now: DateTime<Utc>) -> bool {
    let mut table = self.inner.lock().expect("session table poisoned");
    match table.get_mut(&token) {
      Some(session) if session.expires_at > now => {
        session.expires_at = now + session.timeout;
        true
      }
      Some(_) => {
        table.remove(&token);
        false
      }
      None => false,
    }
  }

  pub fn revoke(&self, token: Uuid) {
    self
      .inner
      .lock()
      .expect("session table poisoned")
      .remove(&token);
  }
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Marker extractor: present in a handler means the request carried a live
/// admin token (whose expiry has just been slid forward).
pub struct AdminAuthed;

fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
  headers
    .get(TOKEN_HEADER)
    .and_then(|v| v.to_str().ok())
    .and_then(|s| Uuid::parse_str(s).ok())
}

impl<S> FromRequestParts<AppState<S>> for AdminAuthed
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token =
      token_from_headers(&parts.headers).ok_or(ApiError::Unauthorized)?;
    if state.sessions.touch(token, Utc::now()) {
      Ok(AdminAuthed)
    } else {
      Err(ApiError::Unauthorized)
    }
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub pin: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
  pub token:      Uuid,
  pub expires_at: DateTime<Utc>,
}

/// `POST /admin/login` — body `{"pin":"1234"}`; 201 + token on success.
///
/// The PIN is compared in plaintext against the settings record, matching
/// the behavior this system is ported from.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let settings = state
    .store
    .load_settings()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if body.pin != settings.admin_pin {
    tracing::warn!("admin login rejected: wrong PIN");
    return Err(ApiError::Unauthorized);
  }

  let timeout = Duration::milliseconds(settings.session_timeout as i64);
  let (token, expires_at) = state.sessions.issue(timeout, Utc::now());
  tracing::info!(%token, "admin session opened");

  Ok((StatusCode::CREATED, Json(LoginResponse { token, expires_at })))
}

/// `POST /admin/logout` — revokes the token in `X-Admin-Token`, if any.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> StatusCode
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  if let Some(token) = token_from_headers(&headers) {
    state.sessions.revoke(token);
  }
  StatusCode::NO_CONTENT
}
