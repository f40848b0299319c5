//! Facility settings — loaded once per session, treated as immutable by the
//! ledger. Field names match the persisted `settings` record.

use serde::{Deserialize, Serialize};

/// Posted opening hours, `HH:MM` strings as displayed at the facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolHours {
  pub open:  String,
  pub close: String,
}

/// Feature toggles carried over from the persisted record. The ledger does
/// not consult these; the presentation layer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
  pub qr_generator:       bool,
  pub incident_logging:   bool,
  pub notice_management:  bool,
  pub occupancy_tracking: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
  /// Compared in plaintext against admin login attempts. A known weak point
  /// of the original system, kept for behavioral fidelity.
  pub admin_pin:               String,
  pub max_occupancy:           u32,
  pub max_guests_per_resident: u32,
  /// Admin session idle timeout, in milliseconds.
  pub session_timeout:         u64,
  pub auto_backup:             bool,
  /// Auto-backup cadence, in milliseconds.
  pub backup_interval:         u64,
  pub pool_name:               String,
  pub pool_hours:              PoolHours,
  pub features:                Features,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      admin_pin:               "1234".to_string(),
      max_occupancy:           50,
      max_guests_per_resident: 5,
      session_timeout:         300_000,
      auto_backup:             true,
      backup_interval:         3_600_000,
      pool_name:               "Community Pool".to_string(),
      pool_hours:              PoolHours {
        open:  "06:00".to_string(),
        close: "22:00".to_string(),
      },
      features:                Features {
        qr_generator:       true,
        incident_logging:   true,
        notice_management:  true,
        occupancy_tracking: true,
      },
    }
  }
}
