//! Core types and trait definitions for the PoolPass check-in system.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod incident;
pub mod ledger;
pub mod notice;
pub mod resident;
pub mod settings;
pub mod snapshot;
pub mod store;

pub use error::{Error, Result};
