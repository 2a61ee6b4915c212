//! SQL schema for the Quire SQLite store.
//!
//! Executed at every connection startup; idempotent thanks to
//! `CREATE ... IF NOT EXISTS`. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `id` is AUTOINCREMENT so an id is never reused after deletion.
CREATE TABLE IF NOT EXISTS papers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    author      TEXT NOT NULL DEFAULT '',
    year        INTEGER,          -- NULL = unknown
    pdf_path    TEXT NOT NULL DEFAULT '',
    image_path  TEXT NOT NULL DEFAULT '',
    memo        TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL,    -- RFC 3339 UTC; server-assigned, immutable
    updated_at  TEXT NOT NULL     -- RFC 3339 UTC; refreshed on every update
);

CREATE INDEX IF NOT EXISTS papers_title_idx  ON papers(title);
CREATE INDEX IF NOT EXISTS papers_author_idx ON papers(author);
CREATE INDEX IF NOT EXISTS papers_year_idx   ON papers(year);

PRAGMA user_version = 1;
";
