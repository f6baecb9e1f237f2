//! Error type for `crm-store-sqlite`.

use crm_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A rejected operation (validation, progression, conflict, not found).
  #[error(transparent)]
  Core(#[from] crm_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

impl DomainError for Error {
  fn domain(&self) -> Option<&crm_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
