//! Incident log kept by pool staff.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged incident. `author` is free-text initials, often empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
  pub id:          Uuid,
  pub timestamp:   DateTime<Utc>,
  pub description: String,
  pub author:      String,
}

/// The persisted `incidents` record, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentLog {
  pub incidents:    Vec<Incident>,
  pub last_updated: DateTime<Utc>,
}

impl IncidentLog {
  pub fn seed(now: DateTime<Utc>) -> Self {
    Self { incidents: Vec::new(), last_updated: now }
  }

  /// Prepend a new incident. Angle brackets are stripped from both fields
  /// since they end up in rendered HTML.
  pub fn log(
    &mut self,
    description: &str,
    author: &str,
    now: DateTime<Utc>,
  ) -> Incident {
    let incident = Incident {
      id:          Uuid::new_v4(),
      timestamp:   now,
      description: description.replace(['<', '>'], "").trim().to_string(),
      author:      author.replace(['<', '>'], "").trim().to_string(),
    };
    self.incidents.insert(0, incident.clone());
    self.last_updated = now;
    incident
  }
}
