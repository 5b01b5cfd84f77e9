//! SQL schema for the health tracker store.
//!
//! The table definitions match databases written by earlier versions of the
//! tracker, so an existing `health_tracker.db` opens without migration.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
-- Reserved: created with the schema, not written by any flow.
CREATE TABLE IF NOT EXISTS facilities (
    id      INTEGER PRIMARY KEY,
    name    TEXT,
    address TEXT
);

-- Issue reports are append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS issues (
    id          INTEGER PRIMARY KEY,
    type        TEXT,   -- 'Flu' | 'Malaria' | 'Diarrhea' | 'Other'
    location    TEXT,   -- as entered, not normalised
    description TEXT,
    lat         REAL,
    lon         REAL
);

CREATE INDEX IF NOT EXISTS issues_type_idx ON issues(type);
";
