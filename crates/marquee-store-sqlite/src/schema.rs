//! SQL schema for the Marquee SQLite store.
//!
//! Applied unconditionally at every open; `PRAGMA user_version` gates any
//! future migration.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS category (
    id              INTEGER PRIMARY KEY,
    ext_category_id INTEGER UNIQUE,  -- feed-assigned, attached when known
    name            TEXT NOT NULL UNIQUE,
    first_seen      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS person (
    id         INTEGER PRIMARY KEY,
    name       TEXT NOT NULL UNIQUE,
    first_seen TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Content rows are fully replaced on re-ingest. The upsert statement itself
-- carries the old id and first_seen into the replacement row, so interleaved
-- license and junction references stay valid.
CREATE TABLE IF NOT EXISTS content (
    id              INTEGER PRIMARY KEY,
    ext_content_id  INTEGER NOT NULL,
    media_item_id   INTEGER NOT NULL,
    film_id         INTEGER NOT NULL,
    permalink_token TEXT,
    watchlink_token TEXT,
    content_ordinal INTEGER,
    program_type    TEXT,
    title           TEXT,
    description     TEXT,
    release_year    INTEGER,
    runtime_s       INTEGER,
    runtime_h       REAL,
    language        TEXT,
    mpaa_rating     TEXT,
    ustv_rating     TEXT,
    encode_type     TEXT,
    license_start   TEXT,            -- datetime() text or NULL
    license_end     TEXT,
    first_seen      TEXT NOT NULL,
    UNIQUE (ext_content_id, title)
);

-- License windows are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table. The UNIQUE
-- constraint backs INSERT OR IGNORE for fully-bounded windows; NULL bounds
-- compare distinct under UNIQUE, so the store additionally gates the insert
-- on its wildcard lookup.
CREATE TABLE IF NOT EXISTS license (
    id            INTEGER PRIMARY KEY,
    content_id    INTEGER NOT NULL REFERENCES content(id),
    license_start TEXT,
    license_end   TEXT,
    UNIQUE (content_id, license_start, license_end)
);

CREATE TABLE IF NOT EXISTS category_content (
    content_id  INTEGER NOT NULL REFERENCES content(id),
    category_id INTEGER NOT NULL REFERENCES category(id),
    UNIQUE (content_id, category_id)
);

CREATE TABLE IF NOT EXISTS starring (
    content_id INTEGER NOT NULL REFERENCES content(id),
    person_id  INTEGER NOT NULL REFERENCES person(id),
    UNIQUE (content_id, person_id)
);

CREATE TABLE IF NOT EXISTS directed_by (
    content_id INTEGER NOT NULL REFERENCES content(id),
    person_id  INTEGER NOT NULL REFERENCES person(id),
    UNIQUE (content_id, person_id)
);

CREATE INDEX IF NOT EXISTS category_content_category_idx ON category_content(category_id);
CREATE INDEX IF NOT EXISTS starring_person_idx           ON starring(person_id);
CREATE INDEX IF NOT EXISTS directed_by_person_idx        ON directed_by(person_id);

PRAGMA user_version = 1;
";
