//! JSON-file backend for the PoolPass record store.
//!
//! One pretty-printed JSON document per named record under a data directory,
//! rewritten wholesale on each save. Missing or unreadable records are
//! replaced with seeded defaults so the system starts in a usable state.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonFileStore;
