//! Error types for `crm-core`.

use thiserror::Error;
use uuid::Uuid;

/// A rejected contact operation.
///
/// The `Display` output of every variant is the message surfaced to API
/// clients, so it is phrased for humans rather than for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A required field is missing or a field has the wrong format.
  #[error("{0}")]
  Validation(String),

  /// An ordered stage field was moved backwards (or sideways to an
  /// unparseable label).
  #[error("{0}")]
  Progression(String),

  /// A uniqueness constraint would be violated.
  #[error("{0}")]
  Conflict(String),

  #[error("contact not found: {0}")]
  NotFound(Uuid),
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation(message.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A backend error that may carry a domain [`Error`].
///
/// Storage backends wrap domain rejections alongside their own I/O failures;
/// the HTTP layer uses [`DomainError::domain`] to tell the two apart.
pub trait DomainError: std::error::Error + Send + Sync + 'static {
  fn domain(&self) -> Option<&Error>;
}

impl DomainError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}
