//! SQLite backend for the CRM contact store.
//!
//! Each contact is kept as one JSON document per row, with the unique email
//! and timestamps lifted into columns for indexing. Wraps [`tokio_rusqlite`]
//! so all database access runs on a dedicated thread without blocking the
//! async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
