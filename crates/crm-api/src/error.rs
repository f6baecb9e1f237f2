//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use crm_core::DomainError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Malformed body, missing required field or bad field format.
  #[error("{0}")]
  Validation(String),

  /// Illegal backward (or sideways) move of an ordered stage.
  #[error("{0}")]
  Progression(String),

  /// Duplicate unique email.
  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn not_found() -> Self { Self::NotFound("Contact not found".to_owned()) }

  /// Classify a backend error: domain rejections keep their meaning, anything
  /// else is an internal failure.
  pub fn from_store<E: DomainError>(e: E) -> Self {
    match e.domain() {
      Some(domain) => domain.clone().into(),
      None => Self::Store(Box::new(e)),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_)
      | ApiError::Progression(_)
      | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<crm_core::Error> for ApiError {
  fn from(e: crm_core::Error) -> Self {
    match e {
      crm_core::Error::Validation(m) => Self::Validation(m),
      crm_core::Error::Progression(m) => Self::Progression(m),
      crm_core::Error::Conflict(m) => Self::Conflict(m),
      crm_core::Error::NotFound(_) => Self::not_found(),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::Validation(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if let ApiError::Store(e) = &self {
      tracing::error!(error = %e, "store failure");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
