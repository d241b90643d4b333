//! SQL schema for the Byline SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps deleted ids from being reused for the lifetime of
/// the table. The `CHECK` constraints are the only field validation in the
/// system; missing required fields surface as constraint violations here,
/// not as handler-level errors.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS articles (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL CHECK (title <> ''),
    author       TEXT NOT NULL CHECK (author <> ''),
    author_url   TEXT,
    category     TEXT,            -- short label, e.g. 'tech'
    published_on TEXT,            -- ISO 8601 date (YYYY-MM-DD) or NULL
    body         TEXT NOT NULL CHECK (body <> '')
);
";
