//! The resident directory — the set of pool-pass holders allowed to check in.
//!
//! Read-only from the ledger's perspective; check-in only consults it to
//! resolve an id. Administration may add residents.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One pool-pass holder. `id` is the pass printed on the card, e.g. `PP001`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
  pub id:   String,
  pub name: String,
}

/// Ordered directory of residents; ids are unique within the sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidentDirectory {
  pub residents: Vec<Resident>,
}

impl ResidentDirectory {
  pub fn lookup(&self, id: &str) -> Option<&Resident> {
    self.residents.iter().find(|r| r.id == id)
  }

  /// Add a resident. When `id` is `None`, the lowest free `PP###` id is
  /// assigned. Fails with [`Error::DuplicateResident`] if the id or the name
  /// is already taken.
  pub fn add(&mut self, name: &str, id: Option<String>) -> Result<Resident> {
    let id = match id {
      Some(id) => id,
      None => self.next_free_id(),
    };

    if self.residents.iter().any(|r| r.id == id || r.name == name) {
      return Err(Error::DuplicateResident);
    }

    let resident = Resident { id, name: name.trim().to_string() };
    self.residents.push(resident.clone());
    Ok(resident)
  }

  fn next_free_id(&self) -> String {
    let mut n = 1usize;
    loop {
      let candidate = format!("PP{n:03}");
      if !self.residents.iter().any(|r| r.id == candidate) {
        return candidate;
      }
      n += 1;
    }
  }

  /// The seed directory shipped with a fresh install.
  pub fn seed() -> Self {
    let residents = [
      ("PP001", "John Smith"),
      ("PP002", "Sarah Johnson"),
      ("PP003", "Michael Davis"),
      ("PP004", "Emily Wilson"),
      ("PP005", "David Brown"),
      ("PP006", "Lisa Anderson"),
      ("PP007", "Robert Taylor"),
      ("PP008", "Jennifer Martinez"),
    ]
    .into_iter()
    .map(|(id, name)| Resident { id: id.to_string(), name: name.to_string() })
    .collect();

    Self { residents }
  }
}
