//! Handlers for pool rules and notices.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use poolpass_core::{
  notice::{Notice, NoticeBoard},
  store::RecordStore,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, session::AdminAuthed};

/// `GET /notices` — rules plus current notices, newest first.
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<NoticeBoard>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let board = state
    .store
    .load_notices()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(board))
}

#[derive(Debug, Deserialize)]
pub struct NewNoticeBody {
  pub text: String,
}

/// `POST /admin/notices` — 201 + the added notice.
pub async fn create<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Json(body): Json<NewNoticeBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  if body.text.trim().is_empty() {
    return Err(ApiError::BadRequest("notice text is required".to_string()));
  }

  let mut board = state
    .store
    .load_notices()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let notice = board.add_notice(&body.text, Utc::now());
  state
    .store
    .save_notices(&board)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(notice)))
}

/// `DELETE /admin/notices/{index}` — removal is by position, newest first.
pub async fn remove<S>(
  _auth: AdminAuthed,
  State(state): State<AppState<S>>,
  Path(index): Path<usize>,
) -> Result<Json<Notice>, ApiError>
where
  S: RecordStore + Clone + Send + Sync + 'static,
{
  let mut board = state
    .store
    .load_notices()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let removed = board
    .remove_notice(index, Utc::now())
    .ok_or_else(|| ApiError::NotFound(format!("no notice at index {index}")))?;
  state
    .store
    .save_notices(&board)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(removed))
}
