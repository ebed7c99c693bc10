//! SQL schema for the Haulbook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Timestamps are stored as text: `recorded_for` uses the minute-precision
/// `YYYY-MM-DDTHH:MM` form (lexicographic order equals chronological order,
/// so range predicates and `ORDER BY` work on the raw column), the rest are
/// RFC 3339 UTC.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- The ledger is strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS waste_loads (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    vehicle_number    TEXT NOT NULL,
    recorded_for      TEXT NOT NULL,   -- event time, minute precision
    weight_kg         REAL NOT NULL CHECK (weight_kg > 0),
    waste_type        TEXT NOT NULL,
    material_category TEXT NOT NULL,
    destination       TEXT NOT NULL,
    panchayath        TEXT,
    created_at        TEXT NOT NULL    -- RFC 3339 UTC; server-assigned
);

-- Single-row profile; the store's upsert keeps it that way.
CREATE TABLE IF NOT EXISTS organization (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    description   TEXT,
    logo_filename TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS waste_loads_vehicle_idx    ON waste_loads(vehicle_number);
CREATE INDEX IF NOT EXISTS waste_loads_recorded_idx   ON waste_loads(recorded_for);
CREATE INDEX IF NOT EXISTS waste_loads_panchayath_idx ON waste_loads(panchayath);

PRAGMA user_version = 1;
";
