pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS business_hours (
    provider_id TEXT NOT NULL,
    day_of_week INTEGER NOT NULL,
    is_open INTEGER NOT NULL DEFAULT 0,
    open_time TEXT,
    close_time TEXT,
    PRIMARY KEY (provider_id, day_of_week)
);

CREATE TABLE IF NOT EXISTS services (
    id TEXT PRIMARY KEY,
    provider_id TEXT NOT NULL,
    name TEXT NOT NULL,
    category TEXT,
    duration_minutes INTEGER NOT NULL,
    price REAL NOT NULL,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_services_provider ON services(provider_id);

CREATE TABLE IF NOT EXISTS bookings (
    id TEXT PRIMARY KEY,
    provider_id TEXT NOT NULL,
    service_id TEXT NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    customer_name TEXT NOT NULL,
    customer_email TEXT,
    customer_phone TEXT,
    service_price REAL NOT NULL,
    platform_fee REAL NOT NULL,
    total_amount REAL NOT NULL,
    confirmation_number TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    provider_notes TEXT,
    customer_notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_bookings_provider_date ON bookings(provider_id, date);

-- Start/end are stored as hour/minute integer pairs (legacy calendar_slots
-- shape); queries.rs normalizes them to \"HH:MM\" so nothing above the
-- storage adapter ever sees this representation.
CREATE TABLE IF NOT EXISTS blocked_intervals (
    id TEXT PRIMARY KEY,
    provider_id TEXT NOT NULL,
    date TEXT NOT NULL,
    start_hour INTEGER NOT NULL,
    start_minute INTEGER NOT NULL,
    end_hour INTEGER NOT NULL,
    end_minute INTEGER NOT NULL,
    kind TEXT NOT NULL DEFAULT 'blocked',
    title TEXT,
    recurrence_pattern TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_blocks_provider_date ON blocked_intervals(provider_id, date);
";

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    conn.execute_batch(SCHEMA)
        .context("failed to apply schema")?;

    Ok(conn)
}
