//! [`SqliteStore`]: the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::Utc;
use crm_core::{
  contact::Contact,
  payload::{ContactPatch, NewContact},
  store::ContactStore,
};
use rusqlite::OptionalExtension as _;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    decode_document, encode_document, encode_dt, encode_uuid,
    is_unique_violation,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Call
/// [`SqliteStore::close`] on shutdown to flush and release the file.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Close the underlying connection. Other clones become unusable.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }
}

fn duplicate_email(email: &str) -> Error {
  crm_core::Error::Conflict(format!(
    "A contact with email {email} already exists"
  ))
  .into()
}

/// Read, patch and write one contact inside a single transaction.
///
/// The outer `Result` carries SQLite failures; the inner one carries
/// rejections, which leave the transaction uncommitted.
fn update_in_tx(
  conn: &mut rusqlite::Connection,
  id: Uuid,
  patch: ContactPatch,
) -> rusqlite::Result<Result<Contact>> {
  let id_str = encode_uuid(id);
  let tx = conn.transaction()?;

  let document: Option<String> = tx
    .query_row(
      "SELECT document FROM contacts WHERE contact_id = ?1",
      rusqlite::params![id_str],
      |row| row.get(0),
    )
    .optional()?;

  let Some(document) = document else {
    return Ok(Err(crm_core::Error::NotFound(id).into()));
  };

  let updated = match decode_document(&document).and_then(|current| {
    patch.apply(&current, Utc::now()).map_err(Error::from)
  }) {
    Ok(contact) => contact,
    Err(e) => return Ok(Err(e)),
  };
  let encoded = match encode_document(&updated) {
    Ok(doc) => doc,
    Err(e) => return Ok(Err(e)),
  };

  let written = tx.execute(
    "UPDATE contacts SET email = ?2, updated_at = ?3, document = ?4
     WHERE contact_id = ?1",
    rusqlite::params![
      id_str,
      updated.email,
      encode_dt(updated.updated_at),
      encoded,
    ],
  );
  match written {
    Ok(_) => {}
    Err(e) if is_unique_violation(&e) => {
      return Ok(Err(duplicate_email(&updated.email)));
    }
    Err(e) => return Err(e),
  }

  tx.commit()?;
  Ok(Ok(updated))
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn create_contact(&self, input: NewContact) -> Result<Contact> {
    let contact = input.into_contact(Uuid::new_v4(), Utc::now())?;

    let id_str      = encode_uuid(contact.id);
    let email       = contact.email.clone();
    let created_str = encode_dt(contact.created_at);
    let updated_str = encode_dt(contact.updated_at);
    let document    = encode_document(&contact)?;

    let inserted = self
      .conn
      .call(move |conn| {
        let result = conn.execute(
          "INSERT INTO contacts (contact_id, email, created_at, updated_at, document)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, email, created_str, updated_str, document],
        );
        match result {
          Ok(_) => Ok(true),
          Err(e) if is_unique_violation(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      info!(email = %contact.email, "rejected duplicate contact email");
      return Err(duplicate_email(&contact.email));
    }

    debug!(id = %contact.id, "created contact");
    Ok(contact)
  }

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let documents: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT document FROM contacts ORDER BY created_at, rowid",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    documents.iter().map(|d| decode_document(d)).collect()
  }

  async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let document: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT document FROM contacts WHERE contact_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    document.as_deref().map(decode_document).transpose()
  }

  async fn update_contact(
    &self,
    id: Uuid,
    patch: ContactPatch,
  ) -> Result<Contact> {
    let outcome = self
      .conn
      .call(move |conn| Ok(update_in_tx(conn, id, patch)?))
      .await?;

    match &outcome {
      Ok(contact) => debug!(%id, status = %contact.status, "updated contact"),
      Err(e) => info!(%id, error = %e, "rejected contact update"),
    }
    outcome
  }

  async fn delete_contact(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(crm_core::Error::NotFound(id).into());
    }
    debug!(%id, "deleted contact");
    Ok(())
  }
}
