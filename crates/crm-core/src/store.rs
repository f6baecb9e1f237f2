//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `crm-store-sqlite`).
//! Higher layers (`crm-api`, `crm-server`) depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  DomainError,
  contact::Contact,
  payload::{ContactPatch, NewContact},
};

/// Abstraction over a contact persistence backend.
///
/// Implementations must validate input themselves rather than trust callers,
/// must keep `email` unique, and must run the progression guard on every
/// update (see [`ContactPatch::apply`]).
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: DomainError;

  /// Validate and persist a new contact. The store assigns `id`, `createdAt`
  /// and `updatedAt`.
  ///
  /// Fails with [`crate::Error::Validation`] on bad input and
  /// [`crate::Error::Conflict`] if the email is already taken.
  fn create_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Every stored contact, oldest first.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Apply a partial update and return the stored result.
  ///
  /// The whole patch is rejected if any field is invalid or if `status` or
  /// the lifecycle stage would move backwards. Fails with
  /// [`crate::Error::NotFound`] for an unknown id.
  fn update_contact(
    &self,
    id: Uuid,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Remove a contact outright. Fails with [`crate::Error::NotFound`] for an
  /// unknown id.
  fn delete_contact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
