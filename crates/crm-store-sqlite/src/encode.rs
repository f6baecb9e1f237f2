//! Encoding helpers between domain types and the plain-text representations
//! stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that they sort
//! lexically. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use crm_core::contact::Contact;
use uuid::Uuid;

use crate::Result;

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn encode_document(contact: &Contact) -> Result<String> {
  Ok(serde_json::to_string(contact)?)
}

pub fn decode_document(s: &str) -> Result<Contact> {
  Ok(serde_json::from_str(s)?)
}

/// Whether `err` is a violation of a `UNIQUE` column constraint.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn timestamps_are_fixed_width() {
    let a = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let b = a + chrono::Duration::microseconds(1500);
    assert_eq!(encode_dt(a), "2024-05-01T12:00:00.000000Z");
    assert_eq!(encode_dt(b), "2024-05-01T12:00:00.001500Z");
    assert!(encode_dt(a) < encode_dt(b));
  }
}
