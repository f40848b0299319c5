//! The occupancy ledger — the authoritative record of who is on-site.
//!
//! Every mutation is validated up front and applied as one in-memory
//! transaction; callers persist the whole ledger afterwards as a single
//! write. Daily statistics roll over lazily, triggered by the first
//! check-in on a new calendar date rather than by a timer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, resident::ResidentDirectory};

// ─── Entries and events ──────────────────────────────────────────────────────

/// One resident currently on-site, plus their guests.
/// Uniquely keyed by `id` within the ledger's active set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckedInEntry {
  pub id:                String,
  pub name:              String,
  pub guest_count:       u32,
  pub checkin_timestamp: DateTime<Utc>,
}

impl CheckedInEntry {
  /// Resident plus guests — the capacity this entry consumes.
  pub fn headcount(&self) -> u32 { 1 + self.guest_count }
}

/// One row in the daily check-in log. Recorded at admission and never
/// removed; check-out does not undo it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinEvent {
  pub event_id:    Uuid,
  pub resident_id: String,
  pub name:        String,
  pub guest_count: u32,
  pub timestamp:   DateTime<Utc>,
}

// ─── Daily statistics ────────────────────────────────────────────────────────

/// Same-day aggregate statistics. Two-phase lifecycle: mutated in place while
/// current, then frozen and appended to `history` on the first check-in of
/// the next calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
  pub date:           NaiveDate,
  pub total_checkins: u32,
  pub peak_occupancy: u32,
  pub checkins:       Vec<CheckinEvent>,
}

impl DailyRecord {
  pub fn fresh(date: NaiveDate) -> Self {
    Self { date, total_checkins: 0, peak_occupancy: 0, checkins: Vec::new() }
  }
}

// ─── Warnings ────────────────────────────────────────────────────────────────

/// Non-fatal signal from [`OccupancyLedger::admin_set_count`]: the requested
/// count exceeded `max_count` and was clamped. The override still committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClampWarning {
  pub requested: i64,
  pub max:       u32,
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// The root occupancy entity. Matches the persisted `occupancy` record.
///
/// Invariant: `current_count` equals the sum of `1 + guest_count` over the
/// active set — except after an [`admin_set_count`](Self::admin_set_count)
/// override, the one sanctioned escape hatch for manual corrections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyLedger {
  pub current_count:        u32,
  pub max_count:            u32,
  pub currently_checked_in: Vec<CheckedInEntry>,
  pub today:                DailyRecord,
  pub history:              Vec<DailyRecord>,
}

impl OccupancyLedger {
  /// A zeroed ledger for a fresh install.
  pub fn seed(max_count: u32, today: NaiveDate) -> Self {
    Self {
      current_count:        0,
      max_count,
      currently_checked_in: Vec::new(),
      today:                DailyRecord::fresh(today),
      history:              Vec::new(),
    }
  }

  pub fn is_checked_in(&self, resident_id: &str) -> bool {
    self.currently_checked_in.iter().any(|e| e.id == resident_id)
  }

  /// How many more people could be admitted right now.
  pub fn remaining_capacity(&self) -> u32 {
    self.max_count.saturating_sub(self.current_count)
  }

  /// Check a resident (plus guests) in.
  ///
  /// Preconditions are checked in order and the first failure wins; no state
  /// is mutated on failure. On success the entry, the count, and today's
  /// statistics are all updated in one step, with the daily rollover applied
  /// first if the calendar date has advanced.
  pub fn check_in(
    &mut self,
    directory: &ResidentDirectory,
    resident_id: &str,
    guest_count: u32,
    max_guests: u32,
    now: DateTime<Utc>,
  ) -> Result<CheckedInEntry> {
    let resident = directory
      .lookup(resident_id)
      .ok_or_else(|| Error::UnknownResident(resident_id.to_string()))?;

    if self.is_checked_in(resident_id) {
      return Err(Error::AlreadyPresent(resident_id.to_string()));
    }

    if guest_count > max_guests {
      return Err(Error::GuestCountOutOfRange {
        requested: guest_count,
        max:       max_guests,
      });
    }

    let admitted = 1 + guest_count;
    if self.current_count + admitted > self.max_count {
      return Err(Error::CapacityExceeded {
        remaining: self.remaining_capacity(),
      });
    }

    self.rollover_if_stale(now.date_naive());

    let entry = CheckedInEntry {
      id:                resident.id.clone(),
      name:              resident.name.clone(),
      guest_count,
      checkin_timestamp: now,
    };

    self.currently_checked_in.push(entry.clone());
    self.current_count += admitted;

    self.today.checkins.push(CheckinEvent {
      event_id:    Uuid::new_v4(),
      resident_id: entry.id.clone(),
      name:        entry.name.clone(),
      guest_count,
      timestamp:   now,
    });
    self.today.total_checkins += admitted;
    self.today.peak_occupancy = self.today.peak_occupancy.max(self.current_count);

    Ok(entry)
  }

  /// Check a resident out, releasing their capacity. Today's statistics are
  /// untouched: check-out does not undo a recorded check-in.
  pub fn check_out(&mut self, resident_id: &str) -> Result<CheckedInEntry> {
    let position = self
      .currently_checked_in
      .iter()
      .position(|e| e.id == resident_id)
      .ok_or_else(|| Error::NotPresent(resident_id.to_string()))?;

    let entry = self.currently_checked_in.remove(position);
    // Floor at 0: should never trigger while the count invariant holds, but
    // an admin override may have lowered the count underneath us.
    self.current_count = self.current_count.saturating_sub(entry.headcount());
    Ok(entry)
  }

  /// Administrative override of `current_count` alone; the active set is
  /// left as-is. Clamps to `[0, max_count]`, returning a [`ClampWarning`]
  /// when the requested value exceeded the maximum. Cannot fail.
  pub fn admin_set_count(&mut self, requested: i64) -> Option<ClampWarning> {
    if requested > i64::from(self.max_count) {
      self.current_count = self.max_count;
      return Some(ClampWarning { requested, max: self.max_count });
    }
    self.current_count = u32::try_from(requested).unwrap_or(0);
    None
  }

  /// Zero the count and clear the active set. Today's statistics and the
  /// history are preserved.
  pub fn admin_reset(&mut self) {
    self.current_count = 0;
    self.currently_checked_in.clear();
  }

  /// Same contract as [`check_out`](Self::check_out); exposed separately
  /// because the administrative surface requires a destructive-action
  /// confirmation before invoking it (a caller concern, not enforced here).
  pub fn admin_force_checkout(&mut self, resident_id: &str) -> Result<CheckedInEntry> {
    self.check_out(resident_id)
  }

  /// Archive `today` into `history` and start a fresh record if the calendar
  /// date has advanced. A day with zero check-ins never reaches this point
  /// with a stale date *and* activity, so completely idle days are silently
  /// skipped — `history` only grows when a rollover actually happens.
  fn rollover_if_stale(&mut self, today: NaiveDate) {
    if self.today.date != today {
      let previous = std::mem::replace(&mut self.today, DailyRecord::fresh(today));
      self.history.push(previous);
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
