//! Full-state backup snapshot — the export/import wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result, incident::IncidentLog, ledger::OccupancyLedger,
  notice::NoticeBoard, resident::ResidentDirectory, settings::Settings,
};

/// Every named record, bundled. One snapshot is one downloadable JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotData {
  pub settings:  Settings,
  pub residents: ResidentDirectory,
  pub occupancy: OccupancyLedger,
  pub notices:   NoticeBoard,
  pub incidents: IncidentLog,
}

/// The export/backup envelope. Import validates only that `data` is present
/// and well-formed; there is no schema version check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
  pub export_date: DateTime<Utc>,
  pub data:        SnapshotData,
}

impl BackupSnapshot {
  /// Parse an uploaded backup. Shape validation is minimal — the `data`
  /// field must be present; there is no schema version check.
  pub fn from_value(value: serde_json::Value) -> Result<Self> {
    if value.get("data").is_none() {
      return Err(Error::InvalidBackupFormat(
        "missing `data` field".to_string(),
      ));
    }
    serde_json::from_value(value)
      .map_err(|e| Error::InvalidBackupFormat(e.to_string()))
  }
}
