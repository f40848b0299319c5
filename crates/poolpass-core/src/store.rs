//! The `RecordStore` trait — one explicit load/save contract per named record.
//!
//! The trait is implemented by storage backends (e.g. `poolpass-store-json`).
//! Higher layers (`poolpass-api`, `poolpass-server`) depend on this
//! abstraction, not on any concrete backend. Every save rewrites the whole
//! record; there are no partial or delta writes.

use std::future::Future;

use crate::{
  incident::IncidentLog, ledger::OccupancyLedger, notice::NoticeBoard,
  resident::ResidentDirectory, settings::Settings, snapshot::BackupSnapshot,
};

/// Abstraction over the PoolPass record store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Named records ─────────────────────────────────────────────────────

  fn load_settings(
    &self,
  ) -> impl Future<Output = Result<Settings, Self::Error>> + Send + '_;

  fn save_settings<'a>(
    &'a self,
    settings: &'a Settings,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn load_residents(
    &self,
  ) -> impl Future<Output = Result<ResidentDirectory, Self::Error>> + Send + '_;

  fn save_residents<'a>(
    &'a self,
    directory: &'a ResidentDirectory,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn load_occupancy(
    &self,
  ) -> impl Future<Output = Result<OccupancyLedger, Self::Error>> + Send + '_;

  fn save_occupancy<'a>(
    &'a self,
    ledger: &'a OccupancyLedger,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn load_notices(
    &self,
  ) -> impl Future<Output = Result<NoticeBoard, Self::Error>> + Send + '_;

  fn save_notices<'a>(
    &'a self,
    board: &'a NoticeBoard,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  fn load_incidents(
    &self,
  ) -> impl Future<Output = Result<IncidentLog, Self::Error>> + Send + '_;

  fn save_incidents<'a>(
    &'a self,
    log: &'a IncidentLog,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Snapshots ─────────────────────────────────────────────────────────

  /// Bundle every named record into one snapshot.
  fn export_snapshot(
    &self,
  ) -> impl Future<Output = Result<BackupSnapshot, Self::Error>> + Send + '_;

  /// Wholesale replace of every named record from `snapshot`.
  fn import_snapshot<'a>(
    &'a self,
    snapshot: &'a BackupSnapshot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
