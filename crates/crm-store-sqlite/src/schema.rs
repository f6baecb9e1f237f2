//! SQL schema for the CRM SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per contact. `document` holds the full record as JSON; the other
-- columns duplicate fields that need an index or a constraint.
CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,  -- lowercase
    created_at  TEXT NOT NULL,         -- RFC 3339 UTC, fixed width
    updated_at  TEXT NOT NULL,
    document    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_created_idx ON contacts(created_at);

PRAGMA user_version = 1;
";
