//! [`JsonFileStore`] — the JSON-file implementation of [`RecordStore`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use poolpass_core::{
  incident::IncidentLog,
  ledger::OccupancyLedger,
  notice::NoticeBoard,
  resident::ResidentDirectory,
  settings::Settings,
  snapshot::{BackupSnapshot, SnapshotData},
  store::RecordStore,
};

use crate::{Error, Result};

const SETTINGS:  &str = "settings.json";
const RESIDENTS: &str = "residents.json";
const OCCUPANCY: &str = "occupancy.json";
const NOTICES:   &str = "notices.json";
const INCIDENTS: &str = "incidents.json";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A PoolPass record store backed by one JSON file per named record.
///
/// Cloning is cheap — only the directory path is held.
#[derive(Clone)]
pub struct JsonFileStore {
  dir: PathBuf,
}

impl JsonFileStore {
  /// Open (or create) a store at `dir` and seed any record that is missing
  /// or unreadable with its default. The system degrades to fresh defaults
  /// rather than refusing to start.
  pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let store = Self { dir: dir.as_ref().to_path_buf() };
    tokio::fs::create_dir_all(&store.dir).await?;
    store.seed_missing().await?;
    Ok(store)
  }

  async fn seed_missing(&self) -> Result<()> {
    let now = Utc::now();

    let settings = self
      .ensure_record(SETTINGS, Settings::default)
      .await?;
    self
      .ensure_record(RESIDENTS, ResidentDirectory::seed)
      .await?;
    self
      .ensure_record(OCCUPANCY, || {
        OccupancyLedger::seed(settings.max_occupancy, now.date_naive())
      })
      .await?;
    self.ensure_record(NOTICES, || NoticeBoard::seed(now)).await?;
    self
      .ensure_record(INCIDENTS, || IncidentLog::seed(now))
      .await?;
    Ok(())
  }

  /// Load `name`, writing `default()` in its place when the document is
  /// missing or does not parse.
  async fn ensure_record<T>(&self, name: &str, default: impl FnOnce() -> T) -> Result<T>
  where
    T: Serialize + DeserializeOwned,
  {
    match self.load_record::<T>(name).await {
      Ok(value) => Ok(value),
      Err(Error::RecordNotFound(_)) => {
        let value = default();
        self.save_record(name, &value).await?;
        Ok(value)
      }
      Err(Error::Json(e)) => {
        tracing::warn!(record = name, error = %e, "record unreadable; reseeding default");
        let value = default();
        self.save_record(name, &value).await?;
        Ok(value)
      }
      Err(e) => Err(e),
    }
  }

  async fn load_record<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
    let path = self.dir.join(name);
    let raw = match tokio::fs::read(&path).await {
      Ok(raw) => raw,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(Error::RecordNotFound(name.to_string()));
      }
      Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&raw)?)
  }

  /// Rewrite the whole document. No partial or delta writes, no retry.
  async fn save_record<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
    let path = self.dir.join(name);
    let raw = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(&path, raw).await?;
    Ok(())
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for JsonFileStore {
  type Error = Error;

  async fn load_settings(&self) -> Result<Settings> {
    self.load_record(SETTINGS).await
  }

  async fn save_settings(&self, settings: &Settings) -> Result<()> {
    self.save_record(SETTINGS, settings).await
  }

  async fn load_residents(&self) -> Result<ResidentDirectory> {
    self.load_record(RESIDENTS).await
  }

  async fn save_residents(&self, directory: &ResidentDirectory) -> Result<()> {
    self.save_record(RESIDENTS, directory).await
  }

  async fn load_occupancy(&self) -> Result<OccupancyLedger> {
    self.load_record(OCCUPANCY).await
  }

  async fn save_occupancy(&self, ledger: &OccupancyLedger) -> Result<()> {
    self.save_record(OCCUPANCY, ledger).await
  }

  async fn load_notices(&self) -> Result<NoticeBoard> {
    self.load_record(NOTICES).await
  }

  async fn save_notices(&self, board: &NoticeBoard) -> Result<()> {
    self.save_record(NOTICES, board).await
  }

  async fn load_incidents(&self) -> Result<IncidentLog> {
    self.load_record(INCIDENTS).await
  }

  async fn save_incidents(&self, log: &IncidentLog) -> Result<()> {
    self.save_record(INCIDENTS, log).await
  }

  async fn export_snapshot(&self) -> Result<BackupSnapshot> {
    Ok(BackupSnapshot {
      export_date: Utc::now(),
      data:        SnapshotData {
        settings:  self.load_settings().await?,
        residents: self.load_residents().await?,
        occupancy: self.load_occupancy().await?,
        notices:   self.load_notices().await?,
        incidents: self.load_incidents().await?,
      },
    })
  }

  async fn import_snapshot(&self, snapshot: &BackupSnapshot) -> Result<()> {
    self.save_settings(&snapshot.data.settings).await?;
    self.save_residents(&snapshot.data.residents).await?;
    self.save_occupancy(&snapshot.data.occupancy).await?;
    self.save_notices(&snapshot.data.notices).await?;
    self.save_incidents(&snapshot.data.incidents).await?;
    Ok(())
  }
}
