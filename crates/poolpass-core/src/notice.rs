//! Pool rules and current notices, as shown on the public rules screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One admin-posted notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
  pub text: String,
  pub date: DateTime<Utc>,
}

/// The persisted `notices` record: standing rules plus transient notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeBoard {
  pub rules:           Vec<String>,
  pub current_notices: Vec<Notice>,
  pub last_updated:    DateTime<Utc>,
}

impl NoticeBoard {
  /// Prepend a notice so the newest is shown first. Angle brackets are
  /// stripped since the text ends up in rendered HTML.
  pub fn add_notice(&mut self, text: &str, now: DateTime<Utc>) -> Notice {
    let notice = Notice {
      text: text.replace(['<', '>'], "").trim().to_string(),
      date: now,
    };
    self.current_notices.insert(0, notice.clone());
    self.last_updated = now;
    notice
  }

  /// Remove the notice at `index`; `None` if out of bounds.
  pub fn remove_notice(&mut self, index: usize, now: DateTime<Utc>) -> Option<Notice> {
    if index >= self.current_notices.len() {
      return None;
    }
    let removed = self.current_notices.remove(index);
    self.last_updated = now;
    Some(removed)
  }

  /// The seed board shipped with a fresh install.
  pub fn seed(now: DateTime<Utc>) -> Self {
    let rules = [
      "No running or diving in shallow end",
      "Children under 12 must be supervised by an adult",
      "No glass containers in pool area",
      "Shower before entering the pool",
      "No food or drinks in the pool",
      "Pool hours: 6:00 AM - 10:00 PM",
      "Maximum occupancy: 50 people",
      "No pets allowed in pool area",
      "Lifeguard on duty during posted hours",
      "Emergency phone located at pool entrance",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    Self { rules, current_notices: Vec::new(), last_updated: now }
  }
}
