//! Handlers for `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/contacts` | Every contact, oldest first |
//! | `POST` | `/contacts` | Body: [`NewContact`]; returns 201 + [`ContactEnvelope`] |
//! | `GET`  | `/contacts/:id` | 404 if not found |
//! | `PUT`, `PATCH` | `/contacts/:id` | Body: [`ContactPatch`]; returns [`ContactEnvelope`] |
//! | `DELETE` | `/contacts/:id` | Returns [`MessageBody`] |
//!
//! Payloads are validated here before they reach the store; the store checks
//! them again before writing.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use crm_core::{
  contact::Contact,
  payload::{ContactPatch, NewContact},
  store::ContactStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

/// Response body for successful writes.
#[derive(Debug, Serialize)]
pub struct ContactEnvelope {
  pub message: &'static str,
  pub contact: Contact,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
  pub message: &'static str,
}

/// An id that is not a UUID cannot name a stored contact.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| ApiError::not_found())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store
    .list_contacts()
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(contacts))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`. Returns 201 with the stored contact.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<NewContact>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(body) = payload?;
  let input = body.normalize();
  input.validate()?;

  let contact = store
    .create_contact(input)
    .await
    .map_err(ApiError::from_store)?;
  Ok((
    StatusCode::CREATED,
    Json(ContactEnvelope { message: "Contact created successfully", contact }),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&id)?;
  let contact = store
    .get_contact(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(ApiError::not_found)?;
  Ok(Json(contact))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}` and `PATCH /contacts/{id}`: partial update.
///
/// Both verbs only touch the fields present in the body.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  payload: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<ContactEnvelope>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&id)?;
  let Json(body) = payload?;
  let patch = body.normalize();
  patch.validate()?;

  let contact = store
    .update_contact(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(ContactEnvelope { message: "Contact updated successfully", contact }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&id)?;
  store
    .delete_contact(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(MessageBody { message: "Contact deleted successfully" }))
}
